//! Data models module
//!
//! Diet log model and the static seed content the screens mount with.

pub mod nutrition;
pub mod seed;

// Re-export commonly used types
pub use nutrition::{DailyLog, MacroBreakdown, Meal};
pub use seed::{sample_meals, sample_questionnaire, sample_workout};
