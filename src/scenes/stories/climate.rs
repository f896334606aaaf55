use crate::engine::state::AnimationState;
use crate::types::{Color, Frame};

use super::{Vignette, ramp, t};

pub const SMOKE_CLEARS_AT: u32 = 60;
pub const CLEANUP_DONE_AT: u32 = 200;
const SKY_CLEARS_OVER: u32 = 200;
const TREES_GROW_OVER: u32 = 220;
const TREE_COUNT: usize = 6;
const GROUND_Y: f32 = -0.6;

/// A polluted skyline turns green as people clean up and plant trees.
pub struct Climate;

impl Vignette for Climate {
    const NUMBER: usize = 2;
    const TITLE: &'static str = "Climate Change";
    const THRESHOLDS: &'static [u32] = &[SMOKE_CLEARS_AT, CLEANUP_DONE_AT];

    fn draw(&self, state: &AnimationState, frame: &mut Frame) {
        let t = t(state);

        let smog = Color::gray(0.6);
        let sky = smog.mix(Color::unit(0.53, 0.81, 0.92), ramp(state, SKY_CLEARS_OVER));
        frame.rect(-1.0, 0.2, 1.0, 1.0, sky);

        frame.rect(-0.95, -0.3, -0.7, 0.2, Color::gray(0.3));
        frame.text(-0.92, -0.35, "Factory", Color::BLACK);
        if !state.running || state.step == 0 {
            let smoke = Color::gray(0.15);
            frame.circle(-0.82, 0.33 + 0.02 * (t * 0.1).sin(), 0.06, smoke);
            frame.circle(-0.75, 0.42 + 0.02 * (t * 0.09).sin(), 0.05, smoke);
        }

        let green = 0.2 + 0.8 * ramp(state, TREES_GROW_OVER);
        for i in 0..TREE_COUNT {
            let x = -0.3 + i as f32 * 0.2;
            frame.circle(x, GROUND_Y + 0.25, 0.12, Color::unit(0.5 * green, 0.7 * green, 0.3 * green));
            frame.rect(x - 0.02, GROUND_Y - 0.12, x + 0.02, GROUND_Y + 0.1, Color::unit(0.45, 0.27, 0.07));
        }

        if !state.running {
            frame.text(-0.95, 0.9, "Scene 2: Climate Change. Press 's' to start cleanup.", Color::BLACK);
        } else if state.step < 2 {
            frame.text(-0.9, 0.85, "People clean up and plant trees...", Color::BLACK);
        } else {
            frame.text(-0.9, 0.85, "Result: Cleaner air and more trees.", Color::BLACK);
        }
    }
}
