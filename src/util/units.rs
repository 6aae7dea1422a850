//! Units formatting and lenient input parsing
//!
//! Formatting for countdowns, weights and elapsed time, plus the
//! never-fail parsing used for free-text weight and rep fields.

use std::str::FromStr;
use std::time::Duration;

/// Parse free text, substituting `fallback` when it does not parse
///
/// Surrounding whitespace is ignored. Input never causes an error.
///
/// # Examples
/// ```
/// use pulsefit::util::units::parse_with_default;
///
/// assert_eq!(parse_with_default(" 12 ", 0u32), 12);
/// assert_eq!(parse_with_default("twelve", 0u32), 0);
/// assert_eq!(parse_with_default("", 5u32), 5);
/// ```
pub fn parse_with_default<T: FromStr>(text: &str, fallback: T) -> T {
    text.trim().parse().unwrap_or(fallback)
}

/// Parse a performed weight in kilograms
///
/// Accepts a comma as decimal separator. Negative, non-finite or
/// unparseable input yields 0.
///
/// # Examples
/// ```
/// use pulsefit::util::units::parse_weight;
///
/// assert_eq!(parse_weight("82.5"), 82.5);
/// assert_eq!(parse_weight("82,5"), 82.5);
/// assert_eq!(parse_weight("-10"), 0.0);
/// assert_eq!(parse_weight("heavy"), 0.0);
/// ```
pub fn parse_weight(text: &str) -> f64 {
    let value = parse_with_default(&text.replace(',', "."), 0.0f64);
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        0.0
    }
}

/// Parse performed reps, falling back to 0
pub fn parse_reps(text: &str) -> u32 {
    parse_with_default(text, 0u32)
}

/// Format remaining rest seconds as a clock
///
/// # Examples
/// ```
/// use pulsefit::util::units::format_countdown;
///
/// assert_eq!(format_countdown(90), "1:30");
/// assert_eq!(format_countdown(5), "0:05");
/// ```
pub fn format_countdown(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Format a weight, dropping the fraction for whole kilograms
///
/// # Examples
/// ```
/// use pulsefit::util::units::format_weight;
///
/// assert_eq!(format_weight(80.0), "80 kg");
/// assert_eq!(format_weight(82.5), "82.5 kg");
/// ```
pub fn format_weight(kg: f64) -> String {
    if kg.fract() == 0.0 {
        format!("{:.0} kg", kg)
    } else {
        format!("{:.1} kg", kg)
    }
}

/// Format an elapsed session duration at second precision
pub fn format_elapsed(duration: Duration) -> String {
    let secs = Duration::from_secs(duration.as_secs());
    if secs.is_zero() {
        return "0s".to_string();
    }
    humantime::format_duration(secs).to_string()
}

/// Format a ratio (0.0 to 1.0+) as a whole percentage
pub fn format_percent(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}
