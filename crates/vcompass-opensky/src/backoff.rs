//! Growing delays between upstream retries.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Jitter adds up to `delay / JITTER_DIVISOR` on top of each delay.
const JITTER_DIVISOR: u64 = 5;

/// Delay sequence for one query: `base`, then doubling up to `max`.
#[derive(Debug, Clone)]
pub struct Backoff {
    upcoming: Duration,
    max: Duration,
}

impl Backoff {
    pub fn new(base: Duration, max: Duration) -> Self {
        let base = base.max(Duration::from_millis(1));
        Self {
            upcoming: base,
            max: max.max(base),
        }
    }

    /// Delay before the next attempt, with jitter so parallel requests
    /// don't retry in lockstep.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.upcoming;
        self.upcoming = self.upcoming.saturating_mul(2).min(self.max);
        jittered(delay)
    }
}

fn jittered(delay: Duration) -> Duration {
    let spread_ms = delay.as_millis() as u64 / JITTER_DIVISOR;
    if spread_ms == 0 {
        return delay;
    }
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::from(elapsed.subsec_nanos()))
        .unwrap_or(0);
    delay + Duration::from_millis(seed % (spread_ms + 1))
}
