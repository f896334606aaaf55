use crate::engine::state::AnimationState;
use crate::types::{Color, Frame};

use super::{Vignette, t};

const IDLE_SPEED: f32 = 0.005;
const SMART_SPEED: f32 = 0.01;
const CAR_COUNT: usize = 6;
const BUILDING_COUNT: usize = 4;
/// Length of the loop the cars drive around, in scene units.
const ROUTE_LENGTH: f32 = 3.0;

/// Traffic flows faster once smart signal control is switched on.
pub struct SmartCity;

impl Vignette for SmartCity {
    const NUMBER: usize = 5;
    const TITLE: &'static str = "Smart City";

    fn draw(&self, state: &AnimationState, frame: &mut Frame) {
        let t = t(state);
        frame.rect(-1.0, 0.0, 1.0, 1.0, Color::unit(0.6, 0.8, 1.0));
        for i in 0..BUILDING_COUNT {
            let x = -0.9 + i as f32 * 0.6;
            frame.rect(x, -0.1, x + 0.4, 0.6, Color::gray(0.9));
        }

        frame.rect(-1.0, -0.5, 1.0, -0.15, Color::gray(0.2));
        let speed = if state.running { SMART_SPEED } else { IDLE_SPEED };
        for i in 0..CAR_COUNT {
            let x = -1.2 + (t * speed + i as f32 * 0.35).rem_euclid(ROUTE_LENGTH) - 1.0;
            let color = if i % 2 == 1 {
                Color::unit(0.9, 0.2, 0.2)
            } else {
                Color::unit(0.2, 0.2, 0.9)
            };
            frame.rect(x, -0.45, x + 0.2, -0.33, color);
        }

        if !state.running {
            frame.text(
                -0.95,
                0.9,
                "Scene 5: Smart City (traffic). Press 's' to enable smart control.",
                Color::BLACK,
            );
        } else {
            frame.text(-0.95, 0.9, "Smart control active: traffic flows smoothly.", Color::BLACK);
        }
    }
}
