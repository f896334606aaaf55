use crate::engine::state::AnimationState;
use crate::types::{Color, Frame};

use super::{Vignette, ramp, skin, t};

pub const PUDDLE_DRY_AT: u32 = 120;
const MOSQUITO_COUNT: usize = 6;
const VILLAGER_COUNT: usize = 5;
/// Below this puddle strength the mosquitoes are gone.
const MOSQUITO_CUTOFF: f32 = 0.05;

/// Standing water breeds mosquitoes until the villagers empty it.
pub struct Dengue;

impl Vignette for Dengue {
    const NUMBER: usize = 3;
    const TITLE: &'static str = "Dengue Awareness";
    const THRESHOLDS: &'static [u32] = &[PUDDLE_DRY_AT];

    fn draw(&self, state: &AnimationState, frame: &mut Frame) {
        let t = t(state);
        let ground = Color::unit(0.8, 0.95, 1.0);
        frame.background = ground;

        let puddle = 1.0 - ramp(state, PUDDLE_DRY_AT);
        frame.circle(-0.6, -0.5, 0.12, ground.mix(Color::unit(0.2, 0.4, 1.0), puddle));

        if puddle > MOSQUITO_CUTOFF {
            for i in 0..MOSQUITO_COUNT {
                let phase = i as f32;
                let mx = -0.7 + 0.15 * (t * 0.05 + phase).sin();
                let my = -0.45 + 0.05 * (t * 0.07 + phase).cos();
                frame.circle(mx, my, 0.01, Color::BLACK);
            }
        }

        for i in 0..VILLAGER_COUNT {
            frame.circle(0.2 + i as f32 * 0.12, -0.4, 0.05, skin());
        }

        if !state.running {
            frame.text(-0.95, 0.9, "Scene 3: Dengue Awareness. Press 's' to start clean-up.", Color::BLACK);
        } else if state.step == 0 {
            frame.text(-0.9, 0.85, "Dirty water present -> mosquitoes breed", Color::BLACK);
        } else {
            frame.text(-0.9, 0.85, "People emptied water and cleaned. Mosquitoes gone!", Color::BLACK);
        }
    }
}
