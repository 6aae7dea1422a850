//! End-to-end questionnaire behavior over the public API

use pulsefit::flow::{AnswerKind, AnswerValue, Question, Questionnaire};
use pulsefit::models::sample_questionnaire;
use pulsefit::PulseError;

fn three_questions() -> Vec<Question> {
    vec![
        Question::new(
            "q1",
            "Primary goal?",
            "Goals",
            AnswerKind::SingleChoice {
                options: vec!["A".into(), "B".into()],
            },
        ),
        Question::new(
            "q2",
            "Which days?",
            "Schedule",
            AnswerKind::MultiChoice {
                options: vec!["X".into(), "Y".into(), "Z".into()],
            },
        ),
        Question::new(
            "q3",
            "Energy level?",
            "Lifestyle",
            AnswerKind::Slider {
                min: 1.0,
                max: 10.0,
                step: 1.0,
                unit: String::new(),
            },
        ),
    ]
}

#[test]
fn test_full_walk_produces_answer_map() {
    let mut flow = Questionnaire::new(three_questions());
    assert_eq!(flow.progress_fraction(), 1.0 / 3.0);

    flow.record_answer("q1", "A", false);
    flow.advance();
    assert_eq!(flow.progress_fraction(), 2.0 / 3.0);
    flow.record_answer("q2", "X", true);
    flow.record_answer("q2", "Y", true);
    flow.advance();
    assert_eq!(flow.progress_fraction(), 1.0);
    assert!(!flow.is_completed());
    flow.record_answer("q3", 7.0, false);
    flow.advance();

    assert!(flow.is_completed());
    assert_eq!(flow.progress_fraction(), 1.0);

    let summary = flow.into_summary();
    assert_eq!(
        serde_json::to_value(&summary.answers).unwrap(),
        serde_json::json!({"q1": "A", "q2": ["X", "Y"], "q3": 7.0})
    );
}

#[test]
fn test_multi_choice_toggle_off_and_empty() {
    let mut flow = Questionnaire::new(three_questions());
    flow.record_answer("q2", "X", true);
    flow.record_answer("q2", "Y", true);
    flow.record_answer("q2", "X", true);
    assert_eq!(
        serde_json::to_value(flow.answer("q2").unwrap()).unwrap(),
        serde_json::json!(["Y"])
    );

    flow.record_answer("q2", "Y", true);
    assert!(!flow.is_answered("q2"));
}

#[test]
fn test_single_choice_replaces_answer() {
    let mut flow = Questionnaire::new(three_questions());
    flow.record_answer("q1", "A", false);
    flow.record_answer("q1", "B", false);
    assert_eq!(flow.answer("q1"), Some(&AnswerValue::from("B")));
}

#[test]
fn test_navigation_bounds_and_gate() {
    let mut flow = Questionnaire::new(three_questions());
    flow.retreat();
    assert_eq!(flow.current_index(), 0);

    assert!(matches!(flow.try_advance(), Err(PulseError::Unanswered(id)) if id == "q1"));
    assert_eq!(flow.current_index(), 0);

    // Plain advance is not gated
    flow.advance();
    assert_eq!(flow.current_index(), 1);
    flow.advance();
    flow.advance();
    assert!(flow.is_completed());
    flow.advance();
    assert_eq!(flow.progress_fraction(), 1.0);

    flow.retreat();
    assert_eq!(flow.current_index(), 2);
    assert!(!flow.is_completed());
}

#[test]
fn test_answers_survive_back_navigation() {
    let mut flow = Questionnaire::new(sample_questionnaire());
    let first = flow.current_question().unwrap().clone();
    let label = first.kind.options()[0].clone();
    flow.select_option(&first.id, &label);
    flow.advance();
    flow.retreat();
    assert_eq!(flow.answer(&first.id), Some(&AnswerValue::from(label.as_str())));
}

#[test]
fn test_empty_questionnaire_is_complete() {
    let flow = Questionnaire::new(Vec::new());
    assert!(flow.is_completed());
    assert!(flow.current_question().is_none());
    assert_eq!(flow.progress_fraction(), 1.0);
}
