//! Two men argue in front of a crowd, then fight.

use crate::engine::state::AnimationState;
use crate::engine::{Input, Scene};
use crate::types::{Color, Frame};

/// Dialogue lines, indexed by the state step.
pub const DIALOGUE: [&str; 4] = [
    "Man 1: You stole my idea!",
    "Man 2: It was mine first!",
    "They start fighting!",
    "Crowd: Fight! Fight! Fight!",
];

pub const REPLY_AT: u32 = 100;
pub const FIGHT_AT: u32 = 200;
pub const CHANT_AT: u32 = 400;

const REPLY_STEP: u32 = 1;
const BRAWL_STEP: u32 = 2;
const CHANT_STEP: u32 = 3;

const START_X: f32 = 0.6;
const GROUND_Y: f32 = -0.3;
const WALK_SPEED: f32 = 0.01;
const COLLIDE_DISTANCE: f32 = 0.15;
const SWAY: f32 = 0.005;
const SWAY_RATE: f32 = 0.2;
const CROWD_SIZE: usize = 19;
/// Cycle length; the fight steps on tick thresholds instead of wraps.
const CYCLE_TICKS: u32 = 100;

pub struct Fight {
    state: AnimationState,
    left_x: f32,
    right_x: f32,
    fighting: bool,
    collided: bool,
}

impl Fight {
    pub fn new() -> Self {
        Fight {
            state: AnimationState::running(CYCLE_TICKS),
            left_x: -START_X,
            right_x: START_X,
            fighting: false,
            collided: false,
        }
    }

    pub fn positions(&self) -> (f32, f32) {
        (self.left_x, self.right_x)
    }

    pub fn is_fighting(&self) -> bool {
        self.fighting
    }

    pub fn has_collided(&self) -> bool {
        self.collided
    }

    fn place_fighters(&mut self) {
        self.left_x = -START_X;
        self.right_x = START_X;
    }

    fn update_fight(&mut self) {
        if self.fighting && !self.collided {
            self.left_x += WALK_SPEED;
            self.right_x -= WALK_SPEED;

            if (self.left_x - self.right_x).abs() < COLLIDE_DISTANCE {
                self.collided = true;
                self.fighting = false;
                self.state.raise_step(BRAWL_STEP);
            }
        }

        if self.collided {
            let sway = SWAY * (self.state.ticks as f32 * SWAY_RATE).sin();
            self.left_x += sway;
            self.right_x -= sway;
        }
    }
}

impl Default for Fight {
    fn default() -> Self {
        Self::new()
    }
}

fn draw_man(frame: &mut Frame, x: f32, y: f32, body: Color) {
    frame.circle(x, y, 0.05, Color::unit(1.0, 0.8, 0.6));
    frame.line(x, y - 0.05, x, y - 0.25, body);
    frame.line(x, y - 0.1, x - 0.1, y - 0.15, body);
    frame.line(x, y - 0.1, x + 0.1, y - 0.15, body);
    frame.line(x, y - 0.25, x - 0.08, y - 0.35, body);
    frame.line(x, y - 0.25, x + 0.08, y - 0.35, body);
}

impl Scene for Fight {
    fn title(&self) -> &str {
        "Two Men Fighting"
    }

    fn state(&self) -> &AnimationState {
        &self.state
    }

    fn tick(&mut self) {
        if !self.state.running {
            return;
        }
        self.state.count();

        match self.state.ticks {
            REPLY_AT => self.state.raise_step(REPLY_STEP),
            FIGHT_AT if !self.fighting => self.fighting = true,
            CHANT_AT => self.state.raise_step(CHANT_STEP),
            _ => {}
        }

        self.update_fight();
    }

    fn render(&self) -> Frame {
        let mut frame = Frame::new(Color::WHITE);

        frame.rect(-1.0, 0.0, 1.0, 1.0, Color::unit(0.53, 0.81, 0.92));
        frame.rect(-1.0, -1.0, 1.0, 0.0, Color::unit(0.4, 0.8, 0.4));

        let crowd = Color::gray(0.2);
        for i in 0..CROWD_SIZE {
            frame.circle(-0.9 + i as f32 * 0.1, -0.1, 0.02, crowd);
        }

        draw_man(&mut frame, self.left_x, GROUND_Y, Color::unit(0.0, 0.0, 1.0));
        draw_man(&mut frame, self.right_x, GROUND_Y, Color::unit(1.0, 0.0, 0.0));

        if let Some(line) = DIALOGUE.get(self.state.step as usize) {
            frame.text(-0.9, 0.85, *line, Color::BLACK);
        }
        frame
    }

    fn on_input(&mut self, input: Input) -> bool {
        match input {
            Input::Restart => {
                self.state.start();
                self.state.raise_step(REPLY_STEP);
                self.place_fighters();
                self.fighting = true;
                self.collided = false;
            }
            Input::Start => {
                if self.state.running {
                    return false;
                }
                self.state.running = true;
            }
            Input::Reset => self.reset(),
            _ => return false,
        }
        true
    }

    fn reset(&mut self) {
        self.state.reset();
        self.place_fighters();
        self.fighting = false;
        self.collided = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dialogue(fight: &Fight) -> String {
        fight.render().texts().next().unwrap_or_default().to_string()
    }

    fn run(fight: &mut Fight, ticks: u32) {
        for _ in 0..ticks {
            fight.tick();
        }
    }

    #[test]
    fn opening_line_until_reply() {
        let mut fight = Fight::new();
        assert_eq!(dialogue(&fight), DIALOGUE[0]);
        run(&mut fight, REPLY_AT - 1);
        assert_eq!(dialogue(&fight), DIALOGUE[0]);
        run(&mut fight, 1);
        assert_eq!(dialogue(&fight), DIALOGUE[1]);
    }

    #[test]
    fn fighters_close_in_and_collide() {
        let mut fight = Fight::new();
        run(&mut fight, FIGHT_AT);
        assert!(fight.is_fighting());
        let (left, _) = fight.positions();
        assert!((left - (-START_X + WALK_SPEED)).abs() < 1e-5);

        run(&mut fight, 60);
        assert!(fight.has_collided());
        assert!(!fight.is_fighting());
        assert_eq!(dialogue(&fight), DIALOGUE[2]);
        let (left, right) = fight.positions();
        assert!((left - right).abs() < COLLIDE_DISTANCE + 2.0 * SWAY);
    }

    #[test]
    fn crowd_chants_at_the_end() {
        let mut fight = Fight::new();
        run(&mut fight, CHANT_AT - 1);
        assert_eq!(dialogue(&fight), DIALOGUE[2]);
        run(&mut fight, 1);
        assert_eq!(dialogue(&fight), DIALOGUE[3]);
    }

    #[test]
    fn restart_rewinds_clock_and_keeps_step_monotonic() {
        let mut fight = Fight::new();
        run(&mut fight, 20);
        assert!(fight.on_input(Input::Restart));
        assert_eq!(fight.state().ticks, 0);
        assert_eq!(fight.positions(), (-START_X, START_X));
        assert_eq!(dialogue(&fight), DIALOGUE[1]);

        let mut last = fight.state().step;
        for _ in 0..CHANT_AT {
            fight.tick();
            assert!(fight.state().step >= last);
            last = fight.state().step;
        }
        assert_eq!(last, CHANT_STEP);
    }

    #[test]
    fn reset_returns_to_idle_opening() {
        let mut fight = Fight::new();
        run(&mut fight, 250);
        fight.on_input(Input::Reset);
        assert!(!fight.state().running);
        assert_eq!(dialogue(&fight), DIALOGUE[0]);
        run(&mut fight, 10);
        assert_eq!(fight.state().ticks, 0);
        assert!(fight.on_input(Input::Start));
        run(&mut fight, 10);
        assert_eq!(fight.state().ticks, 10);
    }

    #[test]
    fn scene_has_sky_ground_crowd_and_two_men() {
        let frame = Fight::new().render();
        // 2 backdrop quads, 19 heads, 2 men of 6 primitives, 1 dialogue line.
        assert_eq!(frame.primitives.len(), 2 + CROWD_SIZE + 12 + 1);
    }
}
