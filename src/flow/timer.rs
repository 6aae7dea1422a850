//! Rest countdown between sets

use tracing::debug;

/// One-shot notification produced by [`RestTimer::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestEvent {
    /// The countdown reached zero
    Finished,
}

/// Whole-second rest countdown
///
/// Ticks only count while resting. The remaining time never goes below zero
/// and reaching zero is the only natural way resting ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestTimer {
    remaining: u32,
    resting: bool,
}

impl RestTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the countdown to `seconds` and start resting
    ///
    /// A zero duration leaves the timer idle.
    pub fn start(&mut self, seconds: u32) {
        self.remaining = seconds;
        self.resting = seconds > 0;
        debug!(seconds, "rest started");
    }

    /// Count down one second
    ///
    /// Returns [`RestEvent::Finished`] on the tick that reaches zero. Ticks
    /// while idle are ignored and nothing is replayed later.
    pub fn tick(&mut self) -> Option<RestEvent> {
        if !self.resting {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.resting = false;
            debug!("rest finished");
            return Some(RestEvent::Finished);
        }
        None
    }

    /// End the rest early. Returns whether a rest was running.
    pub fn skip(&mut self) -> bool {
        let was_resting = self.resting;
        self.resting = false;
        self.remaining = 0;
        was_resting
    }

    pub fn is_resting(&self) -> bool {
        self.resting
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_runs_to_zero() {
        let mut timer = RestTimer::new();
        timer.start(90);
        for _ in 0..89 {
            assert_eq!(timer.tick(), None);
            assert!(timer.is_resting());
        }
        assert_eq!(timer.tick(), Some(RestEvent::Finished));
        assert!(!timer.is_resting());
        assert_eq!(timer.remaining(), 0);

        // No further notifications once idle
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn test_restart_resets_duration() {
        let mut timer = RestTimer::new();
        timer.start(60);
        timer.tick();
        timer.tick();
        timer.start(60);
        assert_eq!(timer.remaining(), 60);
        assert!(timer.is_resting());
    }

    #[test]
    fn test_skip() {
        let mut timer = RestTimer::new();
        assert!(!timer.skip());
        timer.start(30);
        assert!(timer.skip());
        assert!(!timer.is_resting());
        assert_eq!(timer.tick(), None);
    }

    #[test]
    fn test_zero_duration_stays_idle() {
        let mut timer = RestTimer::new();
        timer.start(0);
        assert!(!timer.is_resting());
        assert_eq!(timer.tick(), None);
    }
}
