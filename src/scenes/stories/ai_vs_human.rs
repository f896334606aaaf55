use crate::engine::state::AnimationState;
use crate::types::{Color, Frame};

use super::{Vignette, skin, t};

pub const ROBOT_REPLIES_AT: u32 = 80;
pub const COOPERATION_AT: u32 = 160;

const LINES: [&str; 3] = [
    "Human: Machines will take our jobs!",
    "Robot: I can augment your work, not replace it.",
    "They cooperate: Human + AI = Better outcomes",
];

/// A human and a robot debate, then cooperate.
pub struct AiVsHuman;

impl Vignette for AiVsHuman {
    const NUMBER: usize = 1;
    const TITLE: &'static str = "AI vs Human";
    const THRESHOLDS: &'static [u32] = &[ROBOT_REPLIES_AT, COOPERATION_AT];

    fn draw(&self, state: &AnimationState, frame: &mut Frame) {
        frame.background = Color::unit(0.9, 0.95, 1.0);
        let bob = 0.2 * ((t(state) * 0.05).sin() * 0.2);

        let hx = -0.6 + bob;
        frame.circle(hx, -0.1, 0.08, skin());
        frame.line(hx, -0.18, hx, -0.40, Color::unit(0.2, 0.4, 1.0));

        let rx = 0.6 - bob;
        frame.rect(rx - 0.07, -0.18, rx + 0.07, -0.05, Color::unit(0.7, 0.8, 0.9));
        frame.line(rx, -0.18, rx, -0.40, Color::gray(0.2));

        if !state.running {
            frame.text(
                -0.95,
                0.9,
                "Scene 1: AI vs Human. Press 's' to start. Press 2..0 for other scenes.",
                Color::BLACK,
            );
        } else {
            let line = LINES[(state.step as usize).min(LINES.len() - 1)];
            frame.text(-0.9, 0.8, line, Color::BLACK);
        }
    }
}
