use web_time::{Duration, Instant};

/// Turns wall-clock time into whole-second ticks for the game clock.
///
/// Fractions of a second carry over between polls, so polling at any rate
/// yields one tick per elapsed second.
#[derive(Copy, Clone, Debug)]
pub struct Ticker {
    last: Instant,
}

impl Ticker {
    pub fn new(now: Instant) -> Self {
        Self { last: now }
    }

    pub fn restart(&mut self, now: Instant) {
        self.last = now;
    }

    /// Number of whole seconds since the previous tick.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let secs = now.saturating_duration_since(self.last).as_secs();
        self.last += Duration::from_secs(secs);
        secs.try_into().unwrap_or(u32::MAX)
    }
}
