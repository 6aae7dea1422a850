//! End-to-end workout session behavior over the public API

use std::time::Duration;

use pulsefit::config::WorkoutConfig;
use pulsefit::flow::{ExercisePlan, RestEvent, RestTicker, SetOutcome, WorkoutSession};
use pulsefit::models::sample_workout;
use pulsefit::PulseError;

fn press_plan() -> Vec<ExercisePlan> {
    vec![
        ExercisePlan::new("Bench Press", 3, "8-10", 60.0).with_rest_secs(90),
        ExercisePlan::new("Cable Crunch", 2, "15", 30.0).with_rest_secs(60),
    ]
}

#[test]
fn test_three_set_exercise_with_rest() {
    let mut session = WorkoutSession::new(press_plan());

    assert_eq!(
        session.complete_set(0, 0).unwrap(),
        SetOutcome::Completed { rest: Some(90) }
    );
    assert!(session.is_resting());
    assert_eq!(session.rest_remaining(), 90);

    let mut finished = 0;
    for _ in 0..90 {
        if session.tick() == Some(RestEvent::Finished) {
            finished += 1;
        }
    }
    assert_eq!(finished, 1);
    assert!(!session.is_resting());
    assert_eq!(session.rest_remaining(), 0);

    session.complete_set(0, 1).unwrap();
    assert_eq!(session.rest_remaining(), 90);
    session.skip_rest();
    assert!(!session.is_resting());

    assert_eq!(
        session.complete_set(0, 2).unwrap(),
        SetOutcome::Completed { rest: None }
    );
    assert!(!session.is_resting());
    assert!(session.is_exercise_done(0));
    assert!(!session.is_done());
}

#[test]
fn test_next_set_during_rest_starts_fresh_rest() {
    let mut session = WorkoutSession::new(press_plan());
    session.complete_set(0, 0).unwrap();
    for _ in 0..30 {
        session.tick();
    }
    assert!(session.is_resting());
    assert_eq!(session.rest_remaining(), 60);

    assert_eq!(
        session.complete_set(0, 1).unwrap(),
        SetOutcome::Completed { rest: Some(90) }
    );
    assert!(session.is_resting());
    assert_eq!(session.rest_remaining(), 90);

    assert_eq!(
        session.complete_set(0, 2).unwrap(),
        SetOutcome::Completed { rest: None }
    );
    assert!(session.is_exercise_done(0));
}

#[test]
fn test_completing_during_rest_restarts_countdown() {
    let mut session = WorkoutSession::new(press_plan());
    session.complete_set(0, 0).unwrap();
    for _ in 0..50 {
        session.tick();
    }
    assert_eq!(session.rest_remaining(), 40);

    session.next_exercise();
    session.complete_set(1, 0).unwrap();
    assert_eq!(session.rest_remaining(), 60);
}

#[test]
fn test_complete_set_is_idempotent_and_uncomplete_never_rests() {
    let mut session = WorkoutSession::new(press_plan());
    session.complete_set(0, 0).unwrap();
    session.skip_rest();
    assert_eq!(session.complete_set(0, 0).unwrap(), SetOutcome::AlreadyComplete);
    assert!(!session.is_resting());

    session.uncomplete_set(0, 0).unwrap();
    assert!(!session.is_resting());
    assert!(!session.sets(0).unwrap()[0].completed);
}

#[test]
fn test_invalid_indices_are_rejected() {
    let mut session = WorkoutSession::new(press_plan());
    assert!(matches!(
        session.complete_set(7, 0),
        Err(PulseError::UnknownExercise(7))
    ));
    assert!(matches!(
        session.complete_set(0, 3),
        Err(PulseError::InvalidSet { exercise: 0, set: 3 })
    ));
}

#[test]
fn test_performance_and_dropset_entries() {
    let mut session = WorkoutSession::new(press_plan());
    session.log_performance(0, 0, "62,5", "eight").unwrap();
    let record = session.sets(0).unwrap()[0];
    assert_eq!(record.weight, Some(62.5));
    assert_eq!(record.reps, Some(0));

    assert!(matches!(
        session.record_dropset(0, 0, "40", "8"),
        Err(PulseError::SetNotCompleted { .. })
    ));
    session.complete_set(0, 0).unwrap();
    session.record_dropset(0, 0, "40", "8").unwrap();
    assert_eq!(session.sets(0).unwrap()[0].dropset.map(|d| d.reps), Some(8));
}

#[test]
fn test_finish_requires_confirmation() {
    let mut session = WorkoutSession::new(press_plan());
    session.complete_set(0, 0).unwrap();
    assert!(matches!(
        session.finish(false),
        Err(PulseError::IncompleteWorkout(4))
    ));

    let summary = session.finish(true).unwrap();
    assert!(summary.forced);
    assert!(!session.is_resting());
    assert_eq!(summary.completed_sets(), 1);
    assert_eq!(summary.target_sets(), 5);
}

#[test]
fn test_seed_plan_uses_config_overrides() {
    let config = WorkoutConfig::default();
    let plan = sample_workout(&config);
    assert!(!plan.is_empty());
    assert!(plan.iter().all(|e| e.rest_secs > 0));

    let mut overridden = WorkoutConfig::default();
    overridden
        .rest_overrides
        .insert(plan[0].name.clone(), 45);
    assert_eq!(sample_workout(&overridden)[0].rest_secs, 45);
}

#[tokio::test(start_paused = true)]
async fn test_ticker_drives_rest_to_zero() {
    let mut session = WorkoutSession::new(vec![
        ExercisePlan::new("Lateral Raise", 2, "12-15", 8.0).with_rest_secs(5),
    ]);
    session.complete_set(0, 0).unwrap();

    let mut ticker = RestTicker::spawn(Duration::from_secs(1));
    let mut ticks = 0;
    while session.is_resting() {
        ticker.recv().await.unwrap();
        session.tick();
        ticks += 1;
    }
    assert_eq!(ticks, 5);
    assert_eq!(session.rest_remaining(), 0);
}
