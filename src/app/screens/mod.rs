//! TUI screen components
//!
//! Contains individual screen implementations for different application states.

pub mod diet;
pub mod home;
pub mod questionnaire;
pub mod summary;
pub mod workout;

pub use diet::DietScreen;
pub use home::{HomeItem, HomeScreen};
pub use questionnaire::QuestionnaireScreen;
pub use summary::{SessionSummary, SummaryScreen};
pub use workout::{EntryKind, WorkoutScreen};
