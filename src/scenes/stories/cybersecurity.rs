use crate::engine::state::AnimationState;
use crate::types::{Color, Frame};

use super::{Vignette, t};

/// Packets cross the screen once every 50 ticks.
pub const PACKET_TICKS: u32 = 50;
const DAWN_OVER: u32 = 200;
const PACKET_COUNT: usize = 4;

/// A hacker floods a server with packets until the firewall comes up.
pub struct Cybersecurity;

impl Vignette for Cybersecurity {
    const NUMBER: usize = 4;
    const TITLE: &'static str = "Cybersecurity";
    const CYCLE_TICKS: u32 = PACKET_TICKS;

    fn draw(&self, state: &AnimationState, frame: &mut Frame) {
        let t = t(state);
        let level = 0.07 + 0.4 * (t / DAWN_OVER as f32).min(1.0);
        frame.background = Color::unit(level, level, level + 0.1);

        frame.rect(-0.25, -0.15, 0.25, 0.15, Color::unit(0.2, 0.2, 0.3));
        frame.text(-0.05, 0.02, "Server", Color::BLACK);

        let hx = -0.9 + 0.5 * (t * 0.03).sin();
        frame.circle(hx, 0.0, 0.04, Color::unit(1.0, 0.2, 0.2));

        let packet = Color::unit(1.0, 0.4, 0.4);
        for i in 0..PACKET_COUNT {
            let phase = (state.progress() + i as f32 * 0.25).fract();
            let px = -0.9 + phase * 2.0;
            frame.rect(px - 0.02, -0.05, px + 0.02, 0.05, packet);
        }

        if state.running {
            let shield = 0.4 + 0.2 * (t * 0.12).sin();
            frame.ring(0.0, 0.0, shield, Color::unit(0.2, 0.6, 0.9));
            frame.text(-0.12, -0.25, "Active Firewall", Color::BLACK);
        } else {
            frame.text(
                -0.95,
                0.9,
                "Scene 4: Cybersecurity. Press 's' to enable defense (firewall).",
                Color::BLACK,
            );
        }
    }
}
