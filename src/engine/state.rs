//! Animation state advanced by the timer tick.

use serde::{Deserialize, Serialize};

/// A repeating cycle of `period` ticks.
///
/// Progress is kept as an integer position so that `period` increments of
/// `1 / period` land exactly on the wrap instead of drifting below 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    position: u32,
    period: u32,
}

impl Cycle {
    pub fn new(period: u32) -> Self {
        Cycle {
            position: 0,
            period: period.max(1),
        }
    }

    /// Fraction of the cycle completed, in [0, 1).
    pub fn fraction(&self) -> f32 {
        self.position as f32 / self.period as f32
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    /// Advance one increment. Returns `true` when the cycle wrapped back to
    /// zero on this call.
    pub fn advance(&mut self) -> bool {
        self.position += 1;
        if self.position >= self.period {
            self.position = 0;
            true
        } else {
            false
        }
    }
}

/// The scalars every scene animates from.
///
/// Owned by the scene (and through it by the driver); mutated by `tick` and
/// input handling only, read by `render`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationState {
    pub cycle: Cycle,
    /// Discrete narrative or animation stage. Never decreases while running.
    pub step: u32,
    pub ticks: u32,
    pub running: bool,
    /// Direction flag flipped on every cycle wrap.
    pub forward: bool,
}

impl AnimationState {
    /// Idle state at the start of a cycle of `period` ticks.
    pub fn idle(period: u32) -> Self {
        AnimationState {
            cycle: Cycle::new(period),
            step: 0,
            ticks: 0,
            running: false,
            forward: true,
        }
    }

    pub fn running(period: u32) -> Self {
        AnimationState {
            running: true,
            ..Self::idle(period)
        }
    }

    pub fn progress(&self) -> f32 {
        self.cycle.fraction()
    }

    /// Count one tick and advance the cycle. On wrap the direction flips and
    /// the step advances; returns whether the wrap happened.
    pub fn advance(&mut self) -> bool {
        self.ticks += 1;
        let wrapped = self.cycle.advance();
        if wrapped {
            self.forward = !self.forward;
            self.step += 1;
        }
        wrapped
    }

    /// Count one tick and advance the cycle without wrap transitions. For
    /// scenes whose step is gated by tick thresholds instead.
    pub fn count(&mut self) {
        self.ticks += 1;
        self.cycle.advance();
    }

    /// Raise the step to `step` if it is ahead of the current one.
    pub fn raise_step(&mut self, step: u32) {
        self.step = self.step.max(step);
    }

    /// Enter the running state from the beginning.
    pub fn start(&mut self) {
        *self = Self::running(self.cycle.period());
    }

    /// Return to the idle state from the beginning.
    pub fn reset(&mut self) {
        *self = Self::idle(self.cycle.period());
    }
}

/// Number of `thresholds` already reached at `ticks`. Thresholds must be
/// sorted ascending.
pub fn phase_at(ticks: u32, thresholds: &[u32]) -> u32 {
    thresholds.iter().take_while(|&&t| ticks >= t).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_ticks_reach_forty_percent() {
        let mut state = AnimationState::running(50);
        for _ in 0..20 {
            assert!(!state.advance());
        }
        assert_eq!(state.progress(), 0.4);
        assert_eq!(state.step, 0);
        assert!(state.forward);
    }

    #[test]
    fn wrap_happens_on_the_fiftieth_tick_only() {
        let mut state = AnimationState::running(50);
        let wraps: Vec<u32> = (1..=50).filter(|_| state.advance()).collect();
        assert_eq!(wraps.len(), 1);
        assert_eq!(state.progress(), 0.0);
        assert!(!state.forward);
        assert_eq!(state.step, 1);
        assert_eq!(state.ticks, 50);
    }

    #[test]
    fn progress_stays_in_unit_interval() {
        let mut state = AnimationState::running(7);
        for _ in 0..1000 {
            state.advance();
            let p = state.progress();
            assert!((0.0..1.0).contains(&p), "progress {p} escaped [0, 1)");
        }
        assert_eq!(state.step, 1000 / 7);
    }

    #[test]
    fn count_skips_wrap_transitions() {
        let mut state = AnimationState::running(2);
        state.count();
        state.count();
        assert_eq!(state.ticks, 2);
        assert_eq!(state.step, 0);
        assert!(state.forward);
    }

    #[test]
    fn raise_step_never_lowers() {
        let mut state = AnimationState::running(10);
        state.raise_step(2);
        state.raise_step(1);
        assert_eq!(state.step, 2);
    }

    #[test]
    fn start_and_reset_rewind_everything() {
        let mut state = AnimationState::idle(10);
        state.start();
        for _ in 0..25 {
            state.advance();
        }
        state.start();
        assert_eq!(state, AnimationState::running(10));
        state.advance();
        state.reset();
        assert_eq!(state, AnimationState::idle(10));
    }

    #[test]
    fn phases_from_thresholds() {
        let thresholds = [80, 160];
        assert_eq!(phase_at(0, &thresholds), 0);
        assert_eq!(phase_at(79, &thresholds), 0);
        assert_eq!(phase_at(80, &thresholds), 1);
        assert_eq!(phase_at(159, &thresholds), 1);
        assert_eq!(phase_at(160, &thresholds), 2);
        assert_eq!(phase_at(5, &[]), 0);
    }

    #[test]
    fn zero_period_is_clamped() {
        let mut cycle = Cycle::new(0);
        assert_eq!(cycle.period(), 1);
        assert!(cycle.advance());
    }
}
