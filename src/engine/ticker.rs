//! Repeating timer for the animation tick.

use std::time::{Duration, Instant};

/// Most ticks reported by one `due` call. A loop that stalled longer than
/// this many intervals skips the backlog instead of replaying it.
const MAX_CATCH_UP: u32 = 5;

/// Fixed-period timer that re-arms itself every time its ticks are collected.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    deadline: Instant,
}

impl Ticker {
    pub fn new(interval: Duration, now: Instant) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        Ticker {
            interval,
            deadline: now + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left until the next tick is due; zero if already due.
    pub fn timeout(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }

    /// Number of ticks that have fallen due at `now`. The deadline moves
    /// forward by that many intervals.
    pub fn due(&mut self, now: Instant) -> u32 {
        if now < self.deadline {
            return 0;
        }
        let behind = now.duration_since(self.deadline);
        let elapsed = behind.as_nanos() / self.interval.as_nanos();
        let count = u32::try_from(elapsed)
            .unwrap_or(u32::MAX)
            .saturating_add(1);
        if count > MAX_CATCH_UP {
            self.deadline = now + self.interval;
            return MAX_CATCH_UP;
        }
        self.deadline += self.interval * count;
        count
    }
}
