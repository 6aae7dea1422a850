//! Cosmetic glow pulse
//!
//! The pulse is derived from elapsed time alone so it never shares a state
//! container with session data.

use std::time::Duration;

/// Length of one full pulse (dim -> bright -> dim)
pub const GLOW_PERIOD: Duration = Duration::from_millis(1600);

/// Glow intensity in `[0.0, 1.0]` as a triangle wave over [`GLOW_PERIOD`]
pub fn glow_level(elapsed: Duration) -> f64 {
    let period = GLOW_PERIOD.as_millis();
    let phase = (elapsed.as_millis() % period) as f64 / period as f64;
    if phase < 0.5 {
        phase * 2.0
    } else {
        (1.0 - phase) * 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glow_level_shape() {
        assert_eq!(glow_level(Duration::ZERO), 0.0);
        assert_eq!(glow_level(Duration::from_millis(800)), 1.0);
        assert_eq!(glow_level(Duration::from_millis(400)), 0.5);
        assert_eq!(glow_level(GLOW_PERIOD), 0.0);
    }

    #[test]
    fn test_glow_level_bounded() {
        for ms in (0..5000).step_by(37) {
            let level = glow_level(Duration::from_millis(ms));
            assert!((0.0..=1.0).contains(&level));
        }
    }
}
