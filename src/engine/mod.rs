//! Engine: the scene animation driver.
//!
//! Owns a set of scenes and the selector choosing between them. The timer
//! calls `tick`, the player calls `render` after a redraw request, and key
//! presses arrive as `Input`s. The engine never deals with terminals,
//! ANSI codes, or grids.

pub mod state;
pub mod ticker;

use log::debug;

use crate::types::Frame;
use state::AnimationState;

/// Semantic input decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Start,
    Reset,
    TogglePause,
    Restart,
    RotateLeft,
    RotateRight,
    /// Select a scene by its 1-based number.
    Select(usize),
    Quit,
}

/// What the caller should do after handing the driver an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Redraw,
    Quit,
}

/// An animated scene: state advanced by ticks, drawn by a pure render.
pub trait Scene {
    fn title(&self) -> &str;

    fn state(&self) -> &AnimationState;

    /// Advance the animation by one timer tick.
    fn tick(&mut self);

    /// Draw the current state. Identical state gives an identical frame.
    fn render(&self) -> Frame;

    /// Apply an input. Returns `true` if the state changed.
    fn on_input(&mut self, input: Input) -> bool;

    /// Back to the idle opening state.
    fn reset(&mut self);

    /// The canvas aspect ratio (width / height) changed.
    fn resize(&mut self, _aspect: f32) {}
}

/// Index of the active scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneSelector(usize);

impl SceneSelector {
    /// 1-based number as shown to the user.
    pub fn number(self) -> usize {
        self.0 + 1
    }
}

pub struct Driver {
    scenes: Vec<Box<dyn Scene>>,
    selected: SceneSelector,
}

impl Driver {
    /// Build a driver over `scenes`. The first scene starts selected.
    ///
    /// Panics if `scenes` is empty.
    pub fn new(scenes: Vec<Box<dyn Scene>>) -> Self {
        assert!(!scenes.is_empty(), "a driver needs at least one scene");
        Driver {
            scenes,
            selected: SceneSelector::default(),
        }
    }

    pub fn single(scene: impl Scene + 'static) -> Self {
        Self::new(vec![Box::new(scene)])
    }

    pub fn selected(&self) -> SceneSelector {
        self.selected
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    pub fn scene(&self) -> &dyn Scene {
        self.scenes[self.selected.0].as_ref()
    }

    pub fn state(&self) -> &AnimationState {
        self.scene().state()
    }

    /// Advance the active scene by one tick.
    pub fn tick(&mut self) {
        self.scenes[self.selected.0].tick();
    }

    pub fn render(&self) -> Frame {
        self.scene().render()
    }

    pub fn on_input(&mut self, input: Input) -> Action {
        match input {
            Input::Quit => Action::Quit,
            Input::Select(number) => self.select(number),
            other => {
                if self.scenes[self.selected.0].on_input(other) {
                    debug!("{:?} applied to {}", other, self.scene().title());
                    Action::Redraw
                } else {
                    Action::Continue
                }
            }
        }
    }

    /// Forward a canvas aspect change to every scene.
    pub fn resize(&mut self, aspect: f32) {
        for scene in &mut self.scenes {
            scene.resize(aspect);
        }
    }

    fn select(&mut self, number: usize) -> Action {
        if self.scenes.len() < 2 || number == 0 || number > self.scenes.len() {
            return Action::Continue;
        }
        self.selected = SceneSelector(number - 1);
        let scene = &mut self.scenes[self.selected.0];
        scene.reset();
        debug!("selected scene {number}: {}", scene.title());
        Action::Redraw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    /// Minimal scene: one text primitive naming the scene and its tick.
    struct Counter {
        name: &'static str,
        state: AnimationState,
    }

    impl Counter {
        fn new(name: &'static str) -> Self {
            Counter {
                name,
                state: AnimationState::idle(10),
            }
        }
    }

    impl Scene for Counter {
        fn title(&self) -> &str {
            self.name
        }

        fn state(&self) -> &AnimationState {
            &self.state
        }

        fn tick(&mut self) {
            if self.state.running {
                self.state.advance();
            }
        }

        fn render(&self) -> Frame {
            let mut frame = Frame::new(Color::WHITE);
            frame.text(0.0, 0.0, format!("{} {}", self.name, self.state.ticks), Color::BLACK);
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

    fn two_scenes() -> Driver {
        Driver::new(vec![Box::new(Counter::new("one")), Box::new(Counter::new("two"))])
    }

    #[test]
    fn select_switches_render_and_resets_counters() {
        let mut driver = two_scenes();
        driver.on_input(Input::Start);
        driver.tick();
        driver.tick();
        assert_eq!(driver.render().texts().next(), Some("one 2"));

        assert_eq!(driver.on_input(Input::Select(2)), Action::Redraw);
        assert_eq!(driver.selected().number(), 2);
        assert_eq!(driver.render().texts().next(), Some("two 0"));
        assert_eq!(driver.state().ticks, 0);
        assert!(!driver.state().running);
    }

    #[test]
    fn ticks_only_advance_selected_scene() {
        let mut driver = two_scenes();
        driver.on_input(Input::Select(2));
        driver.on_input(Input::Start);
        driver.tick();
        driver.on_input(Input::Select(1));
        assert_eq!(driver.state().ticks, 0);
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut driver = two_scenes();
        assert_eq!(driver.on_input(Input::Select(0)), Action::Continue);
        assert_eq!(driver.on_input(Input::Select(3)), Action::Continue);
        assert_eq!(driver.selected().number(), 1);
    }

    #[test]
    fn single_scene_ignores_selection() {
        let mut driver = Driver::single(Counter::new("solo"));
        assert_eq!(driver.on_input(Input::Select(1)), Action::Continue);
    }

    #[test]
    fn unhandled_input_continues_and_quit_quits() {
        let mut driver = two_scenes();
        assert_eq!(driver.on_input(Input::RotateLeft), Action::Continue);
        assert_eq!(driver.on_input(Input::Quit), Action::Quit);
    }
}
