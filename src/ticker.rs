use std::time::{Duration, Instant};

/// Default tick interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Turns irregular loop iterations into whole elapsed seconds.
/// The fractional remainder carries over, so no second is lost or doubled.
#[derive(Debug, Clone)]
pub struct SecondTicker {
    last: Instant,
}

impl SecondTicker {
    pub fn new(now: Instant) -> Self {
        Self { last: now }
    }

    /// Number of seconds completed since the previous call
    pub fn due(&mut self, now: Instant) -> u64 {
        let elapsed = now.saturating_duration_since(self.last);
        let seconds = elapsed.as_secs();
        self.last += Duration::from_secs(seconds);
        seconds
    }

    /// Start counting afresh, e.g. when the timer is started
    pub fn restart(&mut self, now: Instant) {
        self.last = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        let duration = tick_duration();
        assert_eq!(duration, Duration::from_millis(250));
    }

    #[test]
    fn test_due_counts_whole_seconds() {
        let start = Instant::now();
        let mut ticker = SecondTicker::new(start);

        assert_eq!(ticker.due(start + Duration::from_millis(900)), 0);
        assert_eq!(ticker.due(start + Duration::from_millis(1100)), 1);
        assert_eq!(ticker.due(start + Duration::from_millis(1900)), 0);
        assert_eq!(ticker.due(start + Duration::from_millis(2000)), 1);
        assert_eq!(ticker.due(start + Duration::from_millis(5500)), 3);
    }

    #[test]
    fn test_restart_drops_partial_second() {
        let start = Instant::now();
        let mut ticker = SecondTicker::new(start);
        ticker.restart(start + Duration::from_millis(700));
        assert_eq!(ticker.due(start + Duration::from_millis(1500)), 0);
        assert_eq!(ticker.due(start + Duration::from_millis(1700)), 1);
    }
}
