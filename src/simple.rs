//! Line-oriented mode for terminals without raw input, or for scripting
//!
//! Reads one command per line and prints plain text. Rest countdowns are
//! shown with an `indicatif` bar driven by the same ticker as the TUI.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::{debug, info, warn};

use crate::app::screens::SessionSummary;
use crate::config::AppConfig;
use crate::error::user_friendly_message;
use crate::flow::{
    AnswerKind, ExercisePlan, Question, Questionnaire, QuestionnaireSummary, RestTicker,
    SetOutcome, WorkoutSession, WorkoutSummary,
};
use crate::models::{sample_meals, sample_questionnaire, sample_workout, DailyLog};
use crate::util::units::{format_countdown, format_percent, format_weight, parse_with_default};
use crate::{PulseError, Result};

/// Options for the plain runner
#[derive(Debug, Clone)]
pub struct PlainOptions {
    /// Print summaries as JSON instead of text
    pub json: bool,
    pub require_answer: bool,
    /// Period of one rest countdown step
    pub rest_tick: Duration,
    /// Draw the rest progress bar on stderr
    pub show_progress: bool,
}

impl PlainOptions {
    pub fn from_config(config: &AppConfig, json: bool) -> Self {
        Self {
            json,
            require_answer: config.questionnaire.require_answer,
            rest_tick: Duration::from_secs(1),
            show_progress: true,
        }
    }
}

fn read_command<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn input_ended() -> PulseError {
    PulseError::IoError(io::Error::new(
        io::ErrorKind::UnexpectedEof,
        "input ended before the questionnaire finished",
    ))
}

/// Main menu loop of plain mode
pub async fn run_plain<R: BufRead, W: Write>(
    config: &AppConfig,
    options: &PlainOptions,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    loop {
        writeln!(output)?;
        writeln!(output, "PulseFit")?;
        writeln!(output, "  1) Fitness Questionnaire")?;
        writeln!(output, "  2) Today's Workout")?;
        writeln!(output, "  3) Meal Plan")?;
        writeln!(output, "  q) Quit")?;
        write!(output, "> ")?;
        output.flush()?;

        let Some(choice) = read_command(input)? else {
            return Ok(());
        };
        let summary = match choice.as_str() {
            "1" => SessionSummary::Questionnaire(run_questionnaire(
                sample_questionnaire(),
                options.require_answer,
                input,
                output,
            )?),
            "2" => SessionSummary::Workout(
                run_workout(sample_workout(&config.workout), options, input, output).await?,
            ),
            "3" => {
                run_diet(sample_meals(config.diet.calorie_goal), input, output)?;
                continue;
            }
            "q" | "Q" => return Ok(()),
            other => {
                writeln!(output, "Unknown choice '{}'.", other)?;
                continue;
            }
        };
        print_summary(&summary, options.json, output)?;
    }
}

/// Print a finished flow as text or JSON
pub fn print_summary<W: Write>(summary: &SessionSummary, json: bool, output: &mut W) -> Result<()> {
    if json {
        writeln!(output, "{}", serde_json::to_string_pretty(summary)?)?;
        return Ok(());
    }
    match summary {
        SessionSummary::Questionnaire(summary) => {
            writeln!(output, "\nYour answers:")?;
            for (id, value) in &summary.answers {
                writeln!(output, "  {:<16} {}", id, value.display())?;
            }
        }
        SessionSummary::Workout(summary) => {
            let heading = if summary.forced {
                "Workout finished early"
            } else {
                "Workout complete"
            };
            writeln!(output, "\n{}", heading)?;
            writeln!(
                output,
                "  Sets    {} / {}",
                summary.completed_sets(),
                summary.target_sets()
            )?;
            writeln!(output, "  Volume  {}", format_weight(summary.total_volume()))?;
            for exercise in &summary.exercises {
                writeln!(
                    output,
                    "  {:<22} {} / {} sets",
                    exercise.name, exercise.completed_sets, exercise.target_sets
                )?;
            }
        }
    }
    Ok(())
}

fn print_question<W: Write>(
    flow: &Questionnaire,
    question: &Question,
    output: &mut W,
) -> Result<()> {
    writeln!(
        output,
        "\n[{}/{}] {} ({})",
        flow.current_index() + 1,
        flow.questions().len(),
        question.prompt,
        question.category
    )?;
    match &question.kind {
        AnswerKind::SingleChoice { options }
        | AnswerKind::MultiChoice { options }
        | AnswerKind::Scale { labels: options } => {
            for (i, option) in options.iter().enumerate() {
                writeln!(output, "  {}) {}", i + 1, option)?;
            }
            if question.kind.is_multiple() {
                writeln!(output, "  (numbers separated by spaces toggle options)")?;
            }
        }
        AnswerKind::Slider {
            min, max, unit, ..
        } => writeln!(output, "  value from {} to {} {}", min, max, unit)?,
    }
    if let Some(answer) = flow.answer(&question.id) {
        writeln!(output, "  current: {}", answer.display())?;
    }
    write!(output, "Enter answer, empty line to continue, 'b' to go back > ")?;
    output.flush()?;
    Ok(())
}

/// Apply one answer line to the current question
///
/// Returns false when nothing in the line was usable.
fn apply_answer(flow: &mut Questionnaire, question: &Question, line: &str) -> bool {
    match &question.kind {
        AnswerKind::SingleChoice { options } => {
            let choice = parse_with_default::<usize>(line, 0);
            match choice.checked_sub(1).and_then(|i| options.get(i)) {
                Some(label) => {
                    flow.select_option(&question.id, label);
                    true
                }
                None => false,
            }
        }
        AnswerKind::MultiChoice { options } => {
            let mut applied = false;
            for token in line.split(|c: char| c == ',' || c.is_whitespace()) {
                let choice = parse_with_default::<usize>(token, 0);
                if let Some(label) = choice.checked_sub(1).and_then(|i| options.get(i)) {
                    flow.toggle_option(&question.id, label);
                    applied = true;
                }
            }
            applied
        }
        AnswerKind::Scale { labels } => {
            let choice = parse_with_default::<usize>(line, 0);
            if (1..=labels.len()).contains(&choice) {
                flow.set_number(&question.id, choice as f64);
                true
            } else {
                false
            }
        }
        AnswerKind::Slider { min, max, .. } => {
            let value = parse_with_default::<f64>(&line.replace(',', "."), f64::NAN);
            if value.is_finite() {
                flow.set_number(&question.id, value.clamp(*min, *max));
                true
            } else {
                false
            }
        }
    }
}

/// Walk the questionnaire over line input
///
/// A usable answer moves on, except for multi-choice questions which stay
/// until an empty line so several toggles can be entered.
pub fn run_questionnaire<R: BufRead, W: Write>(
    questions: Vec<Question>,
    require_answer: bool,
    input: &mut R,
    output: &mut W,
) -> Result<QuestionnaireSummary> {
    let mut flow = Questionnaire::new(questions);

    while let Some(question) = flow.current_question().cloned() {
        print_question(&flow, &question, output)?;
        let line = read_command(input)?.ok_or_else(input_ended)?;

        match line.as_str() {
            "b" | "B" => {
                flow.retreat();
                continue;
            }
            "" => {}
            _ => {
                if !apply_answer(&mut flow, &question, &line) {
                    writeln!(output, "Not a valid answer: '{}'.", line)?;
                    continue;
                }
                debug!(question = %question.id, "answer recorded");
                if question.kind.is_multiple() {
                    continue;
                }
            }
        }

        if require_answer {
            if let Err(e) = flow.try_advance() {
                writeln!(output, "{}", user_friendly_message(&e))?;
            }
        } else {
            flow.advance();
        }
    }

    Ok(flow.into_summary())
}

/// Count down the current rest, one step per ticker period
async fn run_rest(session: &mut WorkoutSession, options: &PlainOptions) {
    let total = session.rest_remaining();
    let target = if options.show_progress {
        ProgressDrawTarget::stderr()
    } else {
        ProgressDrawTarget::hidden()
    };
    let bar = ProgressBar::with_draw_target(Some(u64::from(total)), target);
    bar.set_style(
        ProgressStyle::with_template("Rest {bar:30.cyan/magenta} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_message(format_countdown(total));

    let mut ticker = RestTicker::spawn(options.rest_tick);
    while session.is_resting() {
        if ticker.recv().await.is_none() {
            break;
        }
        session.tick();
        let remaining = session.rest_remaining();
        bar.set_position(u64::from(total.saturating_sub(remaining)));
        bar.set_message(format_countdown(remaining));
    }
    bar.finish_and_clear();
}

/// Ask before finishing with sets left
///
/// Returns None when the user keeps training.
fn finish_with_confirmation<R: BufRead, W: Write>(
    session: &mut WorkoutSession,
    input: &mut R,
    output: &mut W,
) -> Result<Option<WorkoutSummary>> {
    match session.finish(false) {
        Ok(summary) => Ok(Some(summary)),
        Err(PulseError::IncompleteWorkout(remaining)) => {
            write!(output, "{} sets remain. Finish anyway? [y/N] ", remaining)?;
            output.flush()?;
            match read_command(input)? {
                Some(answer) if answer.eq_ignore_ascii_case("y") => {
                    Ok(Some(session.finish(true)?))
                }
                Some(_) => Ok(None),
                None => Ok(Some(session.finish(true)?)),
            }
        }
        Err(e) => Err(e),
    }
}

fn pending_set(session: &WorkoutSession, exercise: usize) -> Option<usize> {
    session
        .sets(exercise)
        .and_then(|sets| sets.iter().position(|record| !record.completed))
}

fn rewind_to_pending(session: &mut WorkoutSession) {
    let Some(target) = (0..session.plan().len()).find(|&i| !session.is_exercise_done(i)) else {
        return;
    };
    while session.current_index() > target {
        session.previous_exercise();
    }
}

/// Walk the workout over line input
///
/// Enter completes the next set. `l W R` logs weight and reps for it, `d W R`
/// adds a dropset to the last completed set, `s` skips to the next exercise
/// and `f` finishes. End of input finishes early.
pub async fn run_workout<R: BufRead, W: Write>(
    plan: Vec<ExercisePlan>,
    options: &PlainOptions,
    input: &mut R,
    output: &mut W,
) -> Result<WorkoutSummary> {
    let mut session = WorkoutSession::new(plan);

    loop {
        let exercise = session.current_index();
        let Some(current) = session.current_exercise().cloned() else {
            return session.finish(true);
        };
        let Some(set) = pending_set(&session, exercise) else {
            if exercise + 1 < session.plan().len() {
                session.next_exercise();
                continue;
            }
            match finish_with_confirmation(&mut session, input, output)? {
                Some(summary) => return Ok(summary),
                None => {
                    rewind_to_pending(&mut session);
                    continue;
                }
            }
        };

        writeln!(
            output,
            "\n{}: set {}/{} ({} reps @ {})",
            current.name,
            set + 1,
            current.target_sets,
            current.rep_range,
            format_weight(current.reference_weight)
        )?;
        write!(output, "[Enter] done  l W R log  d W R dropset  s skip  f finish > ")?;
        output.flush()?;

        let Some(line) = read_command(input)? else {
            warn!("input ended mid-workout");
            return session.finish(true);
        };
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or("");
        let weight = words.next().unwrap_or("");
        let reps = words.next().unwrap_or("");

        match command {
            "" => match session.complete_set(exercise, set)? {
                SetOutcome::Completed { rest: Some(secs) } => {
                    writeln!(output, "Set done. Rest {}.", format_countdown(secs))?;
                    run_rest(&mut session, options).await;
                    writeln!(output, "Rest complete. Next set!")?;
                }
                SetOutcome::Completed { rest: None } => {
                    writeln!(output, "Exercise complete!")?;
                }
                SetOutcome::AlreadyComplete => {}
            },
            "l" => {
                session.log_performance(exercise, set, weight, reps)?;
                writeln!(output, "Set {} updated.", set + 1)?;
            }
            "d" => {
                let result = match set.checked_sub(1) {
                    Some(last) => session.record_dropset(exercise, last, weight, reps),
                    None => Err(PulseError::SetNotCompleted { exercise, set }),
                };
                match result {
                    Ok(()) => writeln!(output, "Dropset recorded.")?,
                    Err(e) => writeln!(output, "{}", user_friendly_message(&e))?,
                }
            }
            "s" => {
                if exercise + 1 < session.plan().len() {
                    session.next_exercise();
                } else if let Some(summary) =
                    finish_with_confirmation(&mut session, input, output)?
                {
                    return Ok(summary);
                }
            }
            "f" => {
                if let Some(summary) = finish_with_confirmation(&mut session, input, output)? {
                    return Ok(summary);
                }
                writeln!(output, "Keep going!")?;
            }
            other => writeln!(output, "Unknown command '{}'.", other)?,
        }
    }
}

/// Show the meal plan and mark meals eaten by number
pub fn run_diet<R: BufRead, W: Write>(
    mut log: DailyLog,
    input: &mut R,
    output: &mut W,
) -> Result<DailyLog> {
    loop {
        writeln!(output, "\nMeal plan")?;
        for (i, meal) in log.meals.iter().enumerate() {
            let check = if meal.eaten { "[x]" } else { "[ ]" };
            writeln!(
                output,
                "  {}) {} {} {:<24} {:>5} kcal",
                i + 1,
                check,
                meal.time,
                meal.name,
                meal.calories
            )?;
        }
        writeln!(
            output,
            "Eaten {} / {} kcal ({})",
            log.total_calories(),
            log.calorie_goal,
            format_percent(log.goal_percentage())
        )?;
        write!(output, "Meal number to toggle, empty line to return > ")?;
        output.flush()?;

        let Some(line) = read_command(input)? else {
            break;
        };
        if line.is_empty() {
            break;
        }
        let choice = parse_with_default::<usize>(&line, 0);
        match choice.checked_sub(1).and_then(|i| log.toggle_eaten(i)) {
            Some(eaten) => debug!(meal = choice, eaten, "meal toggled"),
            None => writeln!(output, "No meal number {}.", line)?,
        }
    }
    info!(calories = log.total_calories(), "diet log closed");
    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::AnswerValue;
    use std::io::Cursor;

    fn quiet() -> PlainOptions {
        PlainOptions {
            json: false,
            require_answer: true,
            rest_tick: Duration::from_secs(1),
            show_progress: false,
        }
    }

    fn questions() -> Vec<Question> {
        vec![
            Question::new(
                "q1",
                "Pick one",
                "Test",
                AnswerKind::SingleChoice {
                    options: vec!["A".into(), "B".into()],
                },
            ),
            Question::new(
                "q2",
                "Pick many",
                "Test",
                AnswerKind::MultiChoice {
                    options: vec!["X".into(), "Y".into(), "Z".into()],
                },
            ),
            Question::new(
                "q3",
                "Slide",
                "Test",
                AnswerKind::Slider {
                    min: 1.0,
                    max: 10.0,
                    step: 1.0,
                    unit: "pts".into(),
                },
            ),
        ]
    }

    #[test]
    fn test_plain_questionnaire() {
        let mut input = Cursor::new("1\n1 2\n\n7\n");
        let mut output = Vec::new();
        let summary = run_questionnaire(questions(), true, &mut input, &mut output).unwrap();
        assert_eq!(summary.answers["q1"], AnswerValue::from("A"));
        assert_eq!(summary.answers["q3"], AnswerValue::Number(7.0));
        assert_eq!(
            serde_json::to_value(&summary.answers["q2"]).unwrap(),
            serde_json::json!(["X", "Y"])
        );
    }

    #[test]
    fn test_plain_questionnaire_gate_and_back() {
        let mut input = Cursor::new("\n9\n2\nb\n1\n3\n\n42\n");
        let mut output = Vec::new();
        let summary = run_questionnaire(questions(), true, &mut input, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Answer this question before moving on."));
        assert!(text.contains("Not a valid answer: '9'."));
        assert_eq!(summary.answers["q1"], AnswerValue::from("A"));
        assert_eq!(summary.answers["q3"], AnswerValue::Number(10.0));
    }

    #[test]
    fn test_plain_questionnaire_eof() {
        let mut input = Cursor::new("1\n");
        let mut output = Vec::new();
        let result = run_questionnaire(questions(), true, &mut input, &mut output);
        assert!(matches!(result, Err(PulseError::IoError(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_plain_workout_with_rest() {
        let plan = vec![ExercisePlan::new("Squat", 2, "5", 100.0).with_rest_secs(3)];
        let mut input = Cursor::new("l 100 5\n\nd 80 6\n\n");
        let mut output = Vec::new();
        let summary = run_workout(plan, &quiet(), &mut input, &mut output)
            .await
            .unwrap();
        assert!(!summary.forced);
        assert_eq!(summary.completed_sets(), 2);
        let sets = &summary.exercises[0].sets;
        assert_eq!(sets[0].weight, Some(100.0));
        assert_eq!(sets[0].dropset.map(|d| d.reps), Some(6));

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Rest 0:03"));
        assert!(text.contains("Exercise complete!"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_plain_workout_finish_confirmation() {
        let plan = vec![ExercisePlan::new("Row", 3, "10", 60.0)];
        let mut input = Cursor::new("f\nn\nf\ny\n");
        let mut output = Vec::new();
        let summary = run_workout(plan, &quiet(), &mut input, &mut output)
            .await
            .unwrap();
        assert!(summary.forced);
        assert_eq!(summary.completed_sets(), 0);
        assert!(String::from_utf8(output).unwrap().contains("Keep going!"));
    }

    #[test]
    fn test_plain_diet_toggles() {
        let mut input = Cursor::new("1\n7\n\n");
        let mut output = Vec::new();
        let log = run_diet(sample_meals(2000), &mut input, &mut output).unwrap();
        assert!(log.meals[0].eaten);
        assert!(String::from_utf8(output).unwrap().contains("No meal number 7."));
    }

    #[test]
    fn test_json_summary() {
        let summary = SessionSummary::Questionnaire(QuestionnaireSummary {
            completed_at: chrono::Utc::now(),
            answers: Default::default(),
        });
        let mut output = Vec::new();
        print_summary(&summary, true, &mut output).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["flow"], "questionnaire");
    }
}
