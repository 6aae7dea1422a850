//! PulseFit - guided workout and questionnaire sessions
//!
//! Session state machines for a fitness tracker (questionnaire, workout with
//! rest countdown, daily diet log) hosted in a terminal UI.

use thiserror::Error;

pub mod app;
pub mod config;
pub mod flow;
pub mod logging;
pub mod models;
pub mod simple;
pub mod util;

/// Common error type
#[derive(Debug, Error)]
pub enum PulseError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Configuration validation or parsing error
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Gated advance attempted on an unanswered question
    #[error("Question '{0}' has not been answered")]
    Unanswered(String),
    /// Exercise index outside the session plan
    #[error("Exercise {0} does not exist")]
    UnknownExercise(usize),
    /// Set index outside the exercise's target set count
    #[error("Set {set} of exercise {exercise} does not exist")]
    InvalidSet { exercise: usize, set: usize },
    /// Annotation requires a completed set
    #[error("Set {set} of exercise {exercise} has not been completed")]
    SetNotCompleted { exercise: usize, set: usize },
    /// Unforced finish while sets remain
    #[error("Workout still has {0} incomplete sets")]
    IncompleteWorkout(usize),
    /// Summary serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for PulseError {
    fn from(err: serde_json::Error) -> Self {
        PulseError::SerializationError(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::de::Error> for PulseError {
    fn from(err: toml::de::Error) -> Self {
        PulseError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for PulseError {
    fn from(err: toml::ser::Error) -> Self {
        PulseError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for PulseFit operations
pub type Result<T> = std::result::Result<T, PulseError>;

/// Error handling utilities
pub mod error {
    use super::PulseError;

    /// Convert error to user-facing status text
    pub fn user_friendly_message(error: &PulseError) -> String {
        match error {
            PulseError::Unanswered(_) => "Answer this question before moving on.".to_string(),
            PulseError::IncompleteWorkout(remaining) => format!(
                "{} sets remain. Press Y to finish anyway or N to keep training.",
                remaining
            ),
            PulseError::SetNotCompleted { .. } => {
                "Complete the set before adding a dropset.".to_string()
            }
            PulseError::ConfigError(msg) => {
                format!("Configuration error: {}. Check your settings.", msg)
            }
            _ => error.to_string(),
        }
    }

    /// Whether the error only needs user confirmation rather than aborting
    pub fn is_advisory(error: &PulseError) -> bool {
        matches!(
            error,
            PulseError::Unanswered(_)
                | PulseError::IncompleteWorkout(_)
                | PulseError::SetNotCompleted { .. }
        )
    }
}

// Common types and constants
pub const APP_NAME: &str = "pulsefit";
pub const CONFIG_FILE: &str = "pulsefit.toml";
pub const LOG_FILE: &str = "pulsefit.log";
/// Rest duration used when neither the seed table nor the config names one
pub const DEFAULT_REST_SECS: u32 = 90;
