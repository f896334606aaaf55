use crate::engine::state::AnimationState;
use crate::types::{Color, Frame};

use super::{Vignette, t};

const ERAS: [f32; 4] = [-0.8, -0.25, 0.25, 0.7];
const CURSOR_SPEED: f32 = 0.01;
const TIMELINE_LENGTH: f32 = 1.8;

/// A cursor travels the timeline from the stone age to AI.
pub struct Technology;

impl Vignette for Technology {
    const NUMBER: usize = 9;
    const TITLE: &'static str = "Evolution of Technology";

    fn draw(&self, state: &AnimationState, frame: &mut Frame) {
        frame.background = Color::gray(0.95);
        frame.line(-0.9, 0.0, 0.9, 0.0, Color::gray(0.2));

        let [stone, steam, digital, ai] = ERAS;
        frame.circle(stone, 0.0, 0.06, Color::unit(0.5, 0.4, 0.3));
        frame.text(stone - 0.07, -0.15, "Stone Age", Color::BLACK);

        frame.rect(steam - 0.04, -0.05, steam + 0.04, 0.15, Color::gray(0.3));
        frame.text(steam - 0.07, -0.15, "Industrial", Color::BLACK);

        frame.rect(digital - 0.06, -0.05, digital + 0.06, 0.08, Color::unit(0.2, 0.2, 0.5));
        frame.text(digital - 0.05, -0.15, "Digital", Color::BLACK);

        frame.circle(ai, 0.05, 0.07, Color::unit(0.9, 0.6, 0.2));
        frame.text(ai - 0.05, -0.15, "AI Future", Color::BLACK);

        if !state.running {
            frame.text(-0.95, 0.9, "Scene 9: Evolution of Technology. Press 's' to animate.", Color::BLACK);
        } else {
            let cursor = -0.9 + (t(state) * CURSOR_SPEED).min(TIMELINE_LENGTH);
            frame.circle(cursor, 0.0, 0.02, Color::unit(1.0, 0.0, 0.0));
            frame.text(0.5, 0.4, "Progress ->", Color::BLACK);
        }
    }
}
