use crate::engine::state::AnimationState;
use crate::types::{Color, Frame};

use super::{Vignette, skin, t};

pub const PEACE_AT: u32 = 200;
/// Children appear once the tick count is past this.
pub const CHILDREN_AFTER: u32 = 260;
const MARCH_SPEED: f32 = 0.004;
const MAX_MARCH: f32 = 0.8;
const SQUAD_SIZE: usize = 5;

/// Two armies march on each other, then make peace.
pub struct WarAndPeace;

impl Vignette for WarAndPeace {
    const NUMBER: usize = 10;
    const TITLE: &'static str = "War vs Peace";
    const THRESHOLDS: &'static [u32] = &[PEACE_AT, CHILDREN_AFTER + 1];

    fn draw(&self, state: &AnimationState, frame: &mut Frame) {
        frame.rect(-1.0, -1.0, 0.0, 1.0, Color::unit(0.6, 0.2, 0.2));
        frame.rect(0.0, -1.0, 1.0, 1.0, Color::unit(0.3, 0.7, 0.3));

        let march = if state.running {
            (t(state) * MARCH_SPEED).min(MAX_MARCH)
        } else {
            0.0
        };
        let left = -0.9 + march;
        let right = 0.9 - march;
        for i in 0..SQUAD_SIZE {
            let dx = i as f32 * 0.06;
            let y = -0.3 + (i % 2) as f32 * 0.03;
            frame.circle(left + dx, y, 0.025, Color::BLACK);
            frame.circle(right - dx, y, 0.025, Color::BLACK);
        }

        if !state.running {
            frame.text(
                -0.95,
                0.9,
                "Scene 10: War vs Peace. Press 's' to start conflict -> resolution.",
                Color::BLACK,
            );
        } else if state.step == 0 {
            frame.text(-0.5, 0.6, "Conflict escalates...", Color::BLACK);
        } else {
            frame.text(-0.3, 0.6, "Peace achieved: They reconcile and children play", Color::BLACK);
        }

        if state.running && state.step >= 2 {
            frame.circle(0.0, -0.4, 0.03, skin());
            frame.circle(0.08, -0.42, 0.03, skin());
            frame.circle(-0.08, -0.42, 0.03, skin());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Input, Scene};
    use crate::scenes::stories::Story;

    #[test]
    fn children_join_only_after_the_truce() {
        let mut story = Story::new(WarAndPeace);
        story.on_input(Input::Start);
        for _ in 0..CHILDREN_AFTER {
            story.tick();
        }
        let before = story.render().primitives.len();
        story.tick();
        assert_eq!(story.render().primitives.len(), before + 3);
    }

    #[test]
    fn armies_stop_at_the_front() {
        let mut story = Story::new(WarAndPeace);
        story.on_input(Input::Start);
        for _ in 0..1000 {
            story.tick();
        }
        let frame = story.render();
        let first_soldier = frame.primitives.iter().find_map(|p| match p {
            crate::types::Primitive::Circle { center, .. } => Some(center.x),
            _ => None,
        });
        assert_eq!(first_soldier, Some(-0.9 + MAX_MARCH));
    }
}
