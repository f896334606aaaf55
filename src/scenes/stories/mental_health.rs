use std::f32::consts::PI;

use crate::engine::state::AnimationState;
use crate::types::{Color, Frame, Point};

use super::{Vignette, ramp, skin, t};

pub const CALM_AT: u32 = 80;
const SOOTHE_OVER: u32 = 200;
const WAVE_COUNT: usize = 4;

/// A stressed person calms down as the room cools.
pub struct MentalHealth;

impl Vignette for MentalHealth {
    const NUMBER: usize = 8;
    const TITLE: &'static str = "Mental Health";
    const THRESHOLDS: &'static [u32] = &[CALM_AT];

    fn draw(&self, state: &AnimationState, frame: &mut Frame) {
        let t = t(state);
        frame.background =
            Color::unit(1.0, 0.5, 0.3).mix(Color::unit(0.7, 0.9, 1.0), ramp(state, SOOTHE_OVER));

        frame.circle(0.0, -0.1, 0.12, skin());
        if !state.running || state.step == 0 {
            let strain = Color::unit(0.8, 0.1, 0.1);
            frame.line(0.2, 0.2, 0.05, 0.05, strain);
            frame.line(-0.2, 0.2, -0.05, 0.05, strain);
            frame.text(-0.12, -0.4, "Stressed", Color::BLACK);
        } else {
            for i in 0..WAVE_COUNT {
                let points = (0..180)
                    .step_by(10)
                    .map(|a| {
                        let angle = a as f32 * PI / 180.0 + t * 0.02;
                        Point::new(
                            -0.5 + i as f32 * 0.25 + 0.2 * angle.cos(),
                            -0.6 + 0.05 * angle.sin(),
                        )
                    })
                    .collect();
                frame.polyline(points, Color::unit(0.0, 0.3 + 0.2 * i as f32, 0.5));
            }
            frame.text(-0.4, -0.4, "Calm achieved: breathe, meditate", Color::BLACK);
        }

        if !state.running {
            frame.text(-0.95, 0.9, "Scene 8: Mental Health. Press 's' to calm down.", Color::BLACK);
        }
    }
}
