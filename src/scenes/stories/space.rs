use crate::engine::state::AnimationState;
use crate::types::{Color, Frame, Point};

use super::{Vignette, t};

const CLIMB_PER_TICK: f32 = 0.02;
const MAX_CLIMB: f32 = 1.8;
/// Tick at which the rocket has finished its climb.
pub const ORBIT_AT: u32 = 90;
const LAUNCH_PAD_Y: f32 = -0.9;
const STAR_COUNT: usize = 40;

/// A rocket launches through a slowly drifting star field.
pub struct Space;

impl Space {
    pub fn rocket_y(state: &AnimationState) -> f32 {
        if state.running {
            LAUNCH_PAD_Y + (t(state) * CLIMB_PER_TICK).min(MAX_CLIMB)
        } else {
            LAUNCH_PAD_Y
        }
    }
}

impl Vignette for Space {
    const NUMBER: usize = 7;
    const TITLE: &'static str = "Space Exploration";
    const THRESHOLDS: &'static [u32] = &[ORBIT_AT];

    fn draw(&self, state: &AnimationState, frame: &mut Frame) {
        frame.background = Color::unit(0.02, 0.02, 0.08);
        let t = t(state);
        for i in 0..STAR_COUNT {
            let sx = -1.0 + i as f32 * 0.137;
            let sy = -0.9 + (i as f32 * 0.213 + t * 0.001).rem_euclid(1.8);
            frame.circle(sx, sy, 0.004, Color::WHITE);
        }

        let ry = Self::rocket_y(state);
        frame.triangle(
            [Point::new(-0.05, ry + 0.1), Point::new(0.05, ry + 0.1), Point::new(0.0, ry + 0.35)],
            Color::unit(0.9, 0.1, 0.1),
        );
        frame.rect(-0.04, ry - 0.1, 0.04, ry + 0.1, Color::gray(0.7));

        if !state.running {
            frame.text(-0.95, 0.9, "Scene 7: Space Exploration. Press 's' to launch rocket.", Color::BLACK);
        } else if state.step == 0 {
            frame.text(-0.95, 0.9, "Rocket launching...", Color::BLACK);
        } else {
            frame.text(-0.95, 0.9, "Rocket reached space! Explore planets.", Color::BLACK);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Input, Scene};
    use crate::scenes::stories::Story;

    #[test]
    fn rocket_reaches_space_when_the_climb_ends() {
        let mut story = Story::new(Space);
        story.on_input(Input::Start);
        for _ in 0..ORBIT_AT - 1 {
            story.tick();
        }
        assert!(story.render().texts().any(|t| t == "Rocket launching..."));
        story.tick();
        assert!((Space::rocket_y(story.state()) - 0.9).abs() < 1e-5);
        assert!(story.render().texts().any(|t| t.starts_with("Rocket reached space!")));
    }

    #[test]
    fn idle_rocket_stays_on_the_pad() {
        let mut state = AnimationState::idle(100);
        state.ticks = 50;
        assert_eq!(Space::rocket_y(&state), LAUNCH_PAD_Y);
    }
}
