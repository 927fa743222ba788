//! Fixed-step tick gate driven by an external monotonic timestamp

use std::time::Duration;

/// Decides when a fixed-interval simulation step is due
///
/// The clock never reads time itself; the host passes the current monotonic
/// timestamp on every frame. The first poll only records a baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickClock {
    interval: Duration,
    last: Option<Duration>,
}

impl TickClock {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last: None }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true when at least one interval has elapsed since the last
    /// step, and re-arms from `now`. At most one step per poll.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.last {
            None => {
                self.last = Some(now);
                false
            }
            Some(last) if now.saturating_sub(last) >= self.interval => {
                self.last = Some(now);
                true
            }
            Some(_) => false,
        }
    }

    /// Forget the baseline, e.g. after a restart
    pub fn reset(&mut self) {
        self.last = None;
    }
}
