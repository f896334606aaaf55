//! The ten-scene storyboard.
//!
//! Each vignette lives in its own module as a stateless drawing unit with
//! its constants. `Story` wraps a vignette with the shared idle/running
//! state machine and the footer.

mod ai_vs_human;
mod climate;
mod cybersecurity;
mod dengue;
mod mental_health;
mod renewable;
mod smart_city;
mod space;
mod technology;
mod war_and_peace;

pub use ai_vs_human::AiVsHuman;
pub use climate::Climate;
pub use cybersecurity::Cybersecurity;
pub use dengue::Dengue;
pub use mental_health::MentalHealth;
pub use renewable::Renewable;
pub use smart_city::SmartCity;
pub use space::Space;
pub use technology::Technology;
pub use war_and_peace::WarAndPeace;

use crate::engine::state::{AnimationState, phase_at};
use crate::engine::{Input, Scene};
use crate::types::{Color, Frame};

/// Default cycle length for vignettes without a repeating motion.
const DEFAULT_CYCLE_TICKS: u32 = 100;

/// Draws one storyboard vignette from the shared animation state.
pub trait Vignette {
    /// 1-based position on the storyboard.
    const NUMBER: usize;
    const TITLE: &'static str;
    /// Tick counts at which the narrative moves to its next step.
    const THRESHOLDS: &'static [u32] = &[];
    const CYCLE_TICKS: u32 = DEFAULT_CYCLE_TICKS;

    fn draw(&self, state: &AnimationState, frame: &mut Frame);
}

pub struct Story<V> {
    vignette: V,
    state: AnimationState,
}

impl<V: Vignette> Story<V> {
    pub fn new(vignette: V) -> Self {
        Story {
            vignette,
            state: AnimationState::idle(V::CYCLE_TICKS),
        }
    }
}

pub fn footer(number: usize) -> String {
    format!("Scene {number}. Keys: 1..9,0 -> switch scenes | s:start | r:reset")
}

impl<V: Vignette> Scene for Story<V> {
    fn title(&self) -> &str {
        V::TITLE
    }

    fn state(&self) -> &AnimationState {
        &self.state
    }

    fn tick(&mut self) {
        if !self.state.running {
            return;
        }
        self.state.count();
        self.state.raise_step(phase_at(self.state.ticks, V::THRESHOLDS));
    }

    fn render(&self) -> Frame {
        let mut frame = Frame::new(Color::WHITE);
        self.vignette.draw(&self.state, &mut frame);
        frame.text(-0.95, -0.95, footer(V::NUMBER), Color::BLACK);
        frame
    }

    fn on_input(&mut self, input: Input) -> bool {
        match input {
            Input::Start => self.state.start(),
            Input::Reset => self.state.reset(),
            _ => return false,
        }
        true
    }

    fn reset(&mut self) {
        self.state.reset();
    }
}

/// All ten vignettes in storyboard order.
pub fn storyboard() -> Vec<Box<dyn Scene>> {
    vec![
        Box::new(Story::new(AiVsHuman)),
        Box::new(Story::new(Climate)),
        Box::new(Story::new(Dengue)),
        Box::new(Story::new(Cybersecurity)),
        Box::new(Story::new(SmartCity)),
        Box::new(Story::new(Renewable)),
        Box::new(Story::new(Space)),
        Box::new(Story::new(MentalHealth)),
        Box::new(Story::new(Technology)),
        Box::new(Story::new(WarAndPeace)),
    ]
}

/// Tick count as the float the motion formulas use.
fn t(state: &AnimationState) -> f32 {
    state.ticks as f32
}

/// `ticks / span`, clamped to [0, 1]; zero while idle.
fn ramp(state: &AnimationState, span: u32) -> f32 {
    if !state.running {
        return 0.0;
    }
    (state.ticks as f32 / span as f32).min(1.0)
}

fn skin() -> Color {
    Color::unit(1.0, 0.8, 0.6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storyboard_is_numbered_in_order() {
        let scenes = storyboard();
        assert_eq!(scenes.len(), 10);
        for (i, scene) in scenes.iter().enumerate() {
            let frame = scene.render();
            assert_eq!(frame.texts().last(), Some(footer(i + 1).as_str()));
        }
    }

    #[test]
    fn idle_story_does_not_tick() {
        let mut story = Story::new(AiVsHuman);
        story.tick();
        assert_eq!(story.state().ticks, 0);
        assert!(story.on_input(Input::Start));
        story.tick();
        assert_eq!(story.state().ticks, 1);
    }

    #[test]
    fn steps_follow_thresholds_and_reset() {
        let mut story = Story::new(AiVsHuman);
        story.on_input(Input::Start);
        let mut last = 0;
        for _ in 0..200 {
            story.tick();
            assert!(story.state().step >= last);
            last = story.state().step;
        }
        assert_eq!(last, 2);
        story.on_input(Input::Reset);
        assert_eq!(story.state().step, 0);
        assert!(!story.state().running);
    }

    #[test]
    fn unrelated_input_is_ignored() {
        let mut story = Story::new(Space);
        assert!(!story.on_input(Input::RotateLeft));
        assert!(!story.on_input(Input::Restart));
    }

    #[test]
    fn every_vignette_renders_deterministically() {
        let mut scenes = storyboard();
        for scene in &mut scenes {
            scene.on_input(Input::Start);
            for _ in 0..137 {
                scene.tick();
            }
            assert_eq!(scene.render(), scene.render(), "{}", scene.title());
        }
    }
}
