//! Utility functions module
//!
//! Contains helpers for units formatting, lenient input parsing and the
//! time-derived cosmetic animation phase.

pub mod glow;
pub mod units;

// Re-export commonly used functions
pub use glow::glow_level;
pub use units::{
    format_countdown, format_elapsed, format_percent, format_weight, parse_reps,
    parse_with_default, parse_weight,
};
