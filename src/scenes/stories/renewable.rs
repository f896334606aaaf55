use crate::engine::state::AnimationState;
use crate::types::{Color, Frame, Point};

use super::Vignette;

/// One full blade revolution at 3 degrees per tick.
pub const REVOLUTION_TICKS: u32 = 120;
const PANEL_COUNT: usize = 3;
const TURBINE_COUNT: usize = 3;
const HUB_Y: f32 = 0.4;

const BLADES: [[Point; 3]; 3] = [
    [Point::new(0.0, 0.0), Point::new(0.15, 0.03), Point::new(0.05, 0.06)],
    [Point::new(0.0, 0.0), Point::new(-0.15, 0.03), Point::new(-0.05, 0.06)],
    [Point::new(0.0, 0.0), Point::new(0.0, -0.15), Point::new(0.06, -0.05)],
];

/// Solar panels and spinning wind turbines.
pub struct Renewable;

impl Vignette for Renewable {
    const NUMBER: usize = 6;
    const TITLE: &'static str = "Renewable Energy";
    const CYCLE_TICKS: u32 = REVOLUTION_TICKS;

    fn draw(&self, state: &AnimationState, frame: &mut Frame) {
        frame.rect(-1.0, 0.1, 1.0, 1.0, Color::unit(0.5, 0.8, 1.0));
        frame.circle(0.7, 0.8, 0.12, Color::unit(1.0, 0.9, 0.0));

        for i in 0..PANEL_COUNT {
            let x = -0.9 + i as f32 * 0.35;
            frame.quad(
                [
                    Point::new(x, -0.1),
                    Point::new(x + 0.25, -0.1),
                    Point::new(x + 0.25, 0.05),
                    Point::new(x, -0.05),
                ],
                Color::unit(0.1, 0.1, 0.4),
            );
        }

        let spin = state.progress() * 360.0;
        for i in 0..TURBINE_COUNT {
            let x = 0.2 + i as f32 * 0.25;
            frame.line(x, -0.1, x, HUB_Y, Color::gray(0.9));
            let hub = Point::new(x, HUB_Y);
            let angle = spin + i as f32 * 30.0;
            for blade in BLADES {
                let corners = blade.map(|p| p.offset(hub.x, hub.y).rotated(hub, angle));
                frame.triangle(corners, Color::gray(0.95));
            }
        }

        if !state.running {
            frame.text(-0.95, 0.9, "Scene 6: Renewable Energy. Press 's' to animate turbines.", Color::BLACK);
        } else {
            frame.text(-0.95, 0.9, "Solar + Wind generating clean energy.", Color::BLACK);
        }
    }
}
