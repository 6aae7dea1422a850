//! Session flows
//!
//! In-memory state machines for the questionnaire and the workout session.
//! Each flow is created from static seed data when its screen mounts and
//! dropped when the screen unmounts.

pub mod cursor;
pub mod questionnaire;
pub mod ticker;
pub mod timer;
pub mod workout;

pub use cursor::Cursor;
pub use questionnaire::{
    AnswerKind, AnswerValue, Question, Questionnaire, QuestionnaireSummary,
};
pub use ticker::RestTicker;
pub use timer::{RestEvent, RestTimer};
pub use workout::{
    Dropset, ExercisePlan, ExerciseReport, SetOutcome, SetRecord, WorkoutSession, WorkoutSummary,
};
