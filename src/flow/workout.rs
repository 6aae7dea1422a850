//! Guided workout session
//!
//! Tracks per-set completion over an ordered exercise plan and runs the rest
//! countdown between sets. Completing any set other than an exercise's last
//! one starts a fresh rest with that exercise's duration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::flow::{Cursor, RestEvent, RestTimer};
use crate::util::units::{parse_reps, parse_weight};
use crate::{PulseError, Result};

/// Static description of one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExercisePlan {
    pub name: String,
    pub target_sets: usize,
    /// Free-form, e.g. "8-12"
    pub rep_range: String,
    /// Suggested working weight in kilograms
    pub reference_weight: f64,
    pub rest_secs: u32,
}

impl ExercisePlan {
    pub fn new(name: &str, target_sets: usize, rep_range: &str, reference_weight: f64) -> Self {
        Self {
            name: name.to_string(),
            target_sets,
            rep_range: rep_range.to_string(),
            reference_weight,
            rest_secs: crate::DEFAULT_REST_SECS,
        }
    }

    pub fn with_rest_secs(mut self, rest_secs: u32) -> Self {
        self.rest_secs = rest_secs;
        self
    }
}

/// Reduced-weight continuation performed right after a set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dropset {
    pub weight: f64,
    pub reps: u32,
}

/// Completion record of one set
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SetRecord {
    pub completed: bool,
    pub weight: Option<f64>,
    pub reps: Option<u32>,
    pub dropset: Option<Dropset>,
}

/// Result of [`WorkoutSession::complete_set`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// Newly completed; `rest` holds the rest duration started, if any
    Completed { rest: Option<u32> },
    /// Already complete, nothing changed
    AlreadyComplete,
}

/// Per-exercise part of a [`WorkoutSummary`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseReport {
    pub name: String,
    pub sets: Vec<SetRecord>,
    pub completed_sets: usize,
    pub target_sets: usize,
}

/// Exercise-completion record handed to the hosting screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Finished through confirmation while sets remained
    pub forced: bool,
    pub exercises: Vec<ExerciseReport>,
}

impl WorkoutSummary {
    pub fn completed_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.completed_sets).sum()
    }

    pub fn target_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.target_sets).sum()
    }

    /// Sum of weight x reps over completed sets, dropsets included
    pub fn total_volume(&self) -> f64 {
        self.exercises
            .iter()
            .flat_map(|e| e.sets.iter())
            .filter(|s| s.completed)
            .map(|s| {
                let main = s.weight.unwrap_or(0.0) * f64::from(s.reps.unwrap_or(0));
                let drop = s.dropset.map_or(0.0, |d| d.weight * f64::from(d.reps));
                main + drop
            })
            .sum()
    }
}

/// Workout session state
#[derive(Debug, Clone)]
pub struct WorkoutSession {
    plan: Vec<ExercisePlan>,
    sets: Vec<Vec<SetRecord>>,
    cursor: Cursor,
    rest: RestTimer,
    started_at: DateTime<Utc>,
}

impl WorkoutSession {
    /// Start a session over `plan` at the first exercise
    pub fn new(plan: Vec<ExercisePlan>) -> Self {
        let sets = plan
            .iter()
            .map(|e| vec![SetRecord::default(); e.target_sets])
            .collect();
        let cursor = Cursor::new(plan.len());
        Self {
            plan,
            sets,
            cursor,
            rest: RestTimer::new(),
            started_at: Utc::now(),
        }
    }

    fn set_mut(&mut self, exercise: usize, set: usize) -> Result<&mut SetRecord> {
        self.sets
            .get_mut(exercise)
            .ok_or(PulseError::UnknownExercise(exercise))?
            .get_mut(set)
            .ok_or(PulseError::InvalidSet { exercise, set })
    }

    /// Mark a set complete
    ///
    /// Idempotent: an already complete set is left alone and does not
    /// restart the rest timer. Completing a set other than the exercise's
    /// last one starts the rest.
    pub fn complete_set(&mut self, exercise: usize, set: usize) -> Result<SetOutcome> {
        let record = self.set_mut(exercise, set)?;
        if record.completed {
            return Ok(SetOutcome::AlreadyComplete);
        }
        record.completed = true;

        let plan = &self.plan[exercise];
        info!(exercise = %plan.name, set = set + 1, of = plan.target_sets, "set completed");
        let rest = if set + 1 < plan.target_sets {
            let secs = plan.rest_secs;
            self.start_rest(secs);
            Some(secs)
        } else {
            None
        };
        Ok(SetOutcome::Completed { rest })
    }

    /// Clear a set's completion mark. Never starts a rest.
    pub fn uncomplete_set(&mut self, exercise: usize, set: usize) -> Result<()> {
        let record = self.set_mut(exercise, set)?;
        record.completed = false;
        record.dropset = None;
        debug!(exercise, set, "set unmarked");
        Ok(())
    }

    /// Store the performed weight and reps from free-text input
    ///
    /// Unparseable values fall back to 0.
    pub fn log_performance(
        &mut self,
        exercise: usize,
        set: usize,
        weight_text: &str,
        reps_text: &str,
    ) -> Result<()> {
        let record = self.set_mut(exercise, set)?;
        record.weight = Some(parse_weight(weight_text));
        record.reps = Some(parse_reps(reps_text));
        Ok(())
    }

    /// Annotate a completed set with a dropset from free-text input
    pub fn record_dropset(
        &mut self,
        exercise: usize,
        set: usize,
        weight_text: &str,
        reps_text: &str,
    ) -> Result<()> {
        let record = self.set_mut(exercise, set)?;
        if !record.completed {
            return Err(PulseError::SetNotCompleted { exercise, set });
        }
        record.dropset = Some(Dropset {
            weight: parse_weight(weight_text),
            reps: parse_reps(reps_text),
        });
        Ok(())
    }

    /// Reset the rest countdown to `seconds` and start resting
    pub fn start_rest(&mut self, seconds: u32) {
        self.rest.start(seconds);
    }

    /// Count the rest down by one second
    pub fn tick(&mut self) -> Option<RestEvent> {
        self.rest.tick()
    }

    /// End the current rest early
    pub fn skip_rest(&mut self) {
        if self.rest.skip() {
            debug!("rest skipped");
        }
    }

    pub fn is_resting(&self) -> bool {
        self.rest.is_resting()
    }

    pub fn rest_remaining(&self) -> u32 {
        self.rest.remaining()
    }

    /// Move to the next exercise, clamped at the last
    pub fn next_exercise(&mut self) {
        self.cursor.next_clamped();
    }

    /// Move to the previous exercise, clamped at the first
    pub fn previous_exercise(&mut self) {
        self.cursor.previous_clamped();
    }

    pub fn current_index(&self) -> usize {
        self.cursor.index()
    }

    pub fn current_exercise(&self) -> Option<&ExercisePlan> {
        self.plan.get(self.cursor.index())
    }

    pub fn plan(&self) -> &[ExercisePlan] {
        &self.plan
    }

    pub fn sets(&self, exercise: usize) -> Option<&[SetRecord]> {
        self.sets.get(exercise).map(Vec::as_slice)
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// All sets of the exercise are complete
    pub fn is_exercise_done(&self, exercise: usize) -> bool {
        self.sets
            .get(exercise)
            .is_some_and(|sets| sets.iter().all(|s| s.completed))
    }

    /// Every exercise is done
    pub fn is_done(&self) -> bool {
        (0..self.plan.len()).all(|i| self.is_exercise_done(i))
    }

    /// Number of sets not yet completed across the session
    pub fn remaining_sets(&self) -> usize {
        self.sets
            .iter()
            .flat_map(|sets| sets.iter())
            .filter(|s| !s.completed)
            .count()
    }

    /// Produce the session's completion record
    ///
    /// Without `force`, remaining sets yield [`PulseError::IncompleteWorkout`]
    /// so the host can ask for confirmation. Finishing ends any rest.
    pub fn finish(&mut self, force: bool) -> Result<WorkoutSummary> {
        let remaining = self.remaining_sets();
        if remaining > 0 && !force {
            return Err(PulseError::IncompleteWorkout(remaining));
        }
        if remaining > 0 {
            warn!(remaining, "workout finished with incomplete sets");
        }
        self.rest.skip();

        let exercises = self
            .plan
            .iter()
            .zip(&self.sets)
            .map(|(plan, sets)| ExerciseReport {
                name: plan.name.clone(),
                sets: sets.clone(),
                completed_sets: sets.iter().filter(|s| s.completed).count(),
                target_sets: plan.target_sets,
            })
            .collect();

        let summary = WorkoutSummary {
            started_at: self.started_at,
            finished_at: Utc::now(),
            forced: remaining > 0,
            exercises,
        };
        info!(
            completed = summary.completed_sets(),
            target = summary.target_sets(),
            "workout finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> WorkoutSession {
        WorkoutSession::new(vec![
            ExercisePlan::new("Bench Press", 3, "8-10", 60.0).with_rest_secs(90),
            ExercisePlan::new("Lateral Raise", 2, "12-15", 8.0).with_rest_secs(60),
        ])
    }

    #[test]
    fn test_complete_set_starts_rest() {
        let mut s = session();
        assert_eq!(
            s.complete_set(0, 0).unwrap(),
            SetOutcome::Completed { rest: Some(90) }
        );
        assert!(s.is_resting());
        assert_eq!(s.rest_remaining(), 90);
    }

    #[test]
    fn test_last_set_does_not_rest() {
        let mut s = session();
        assert_eq!(
            s.complete_set(1, 1).unwrap(),
            SetOutcome::Completed { rest: None }
        );
        assert!(!s.is_resting());
    }

    #[test]
    fn test_complete_set_idempotent() {
        let mut s = session();
        s.complete_set(0, 0).unwrap();
        for _ in 0..90 {
            s.tick();
        }
        assert!(!s.is_resting());
        assert_eq!(s.complete_set(0, 0).unwrap(), SetOutcome::AlreadyComplete);
        assert!(!s.is_resting());
        assert_eq!(s.sets(0).unwrap().iter().filter(|r| r.completed).count(), 1);
    }

    #[test]
    fn test_invalid_indices() {
        let mut s = session();
        assert!(matches!(
            s.complete_set(5, 0),
            Err(PulseError::UnknownExercise(5))
        ));
        assert!(matches!(
            s.complete_set(1, 2),
            Err(PulseError::InvalidSet { exercise: 1, set: 2 })
        ));
    }

    #[test]
    fn test_exercise_navigation_keeps_history() {
        let mut s = session();
        s.complete_set(0, 0).unwrap();
        s.next_exercise();
        s.next_exercise();
        assert_eq!(s.current_index(), 1);
        s.previous_exercise();
        s.previous_exercise();
        assert_eq!(s.current_index(), 0);
        assert!(s.sets(0).unwrap()[0].completed);
    }

    #[test]
    fn test_uncomplete_set() {
        let mut s = session();
        s.complete_set(1, 1).unwrap();
        s.record_dropset(1, 1, "5", "10").unwrap();
        s.uncomplete_set(1, 1).unwrap();
        let record = s.sets(1).unwrap()[1];
        assert!(!record.completed);
        assert!(record.dropset.is_none());
        assert!(!s.is_resting());
    }

    #[test]
    fn test_log_performance_fallback() {
        let mut s = session();
        s.log_performance(0, 0, "62,5", "eight").unwrap();
        let record = s.sets(0).unwrap()[0];
        assert_eq!(record.weight, Some(62.5));
        assert_eq!(record.reps, Some(0));
    }

    #[test]
    fn test_dropset_requires_completion() {
        let mut s = session();
        assert!(matches!(
            s.record_dropset(0, 0, "40", "8"),
            Err(PulseError::SetNotCompleted { exercise: 0, set: 0 })
        ));
        s.complete_set(0, 0).unwrap();
        s.record_dropset(0, 0, "40", "8").unwrap();
        assert_eq!(
            s.sets(0).unwrap()[0].dropset,
            Some(Dropset { weight: 40.0, reps: 8 })
        );
    }

    #[test]
    fn test_finish_requires_confirmation() {
        let mut s = session();
        s.complete_set(0, 0).unwrap();
        assert!(matches!(s.finish(false), Err(PulseError::IncompleteWorkout(4))));

        let summary = s.finish(true).unwrap();
        assert!(summary.forced);
        assert_eq!(summary.completed_sets(), 1);
        assert_eq!(summary.target_sets(), 5);
        assert!(!s.is_resting());
    }

    #[test]
    fn test_finish_when_done() {
        let mut s = session();
        for (exercise, sets) in [(0, 3), (1, 2)] {
            for set in 0..sets {
                s.complete_set(exercise, set).unwrap();
                s.log_performance(exercise, set, "10", "10").unwrap();
            }
        }
        assert!(s.is_done());
        let summary = s.finish(false).unwrap();
        assert!(!summary.forced);
        assert_eq!(summary.total_volume(), 500.0);
    }

    #[test]
    fn test_empty_plan_is_done() {
        let mut s = WorkoutSession::new(Vec::new());
        assert!(s.is_done());
        assert!(s.current_exercise().is_none());
        s.next_exercise();
        assert_eq!(s.current_index(), 0);
    }
}
