//! Static reference content
//!
//! Sample questionnaire, workout and meal plan the screens mount with.

use crate::config::WorkoutConfig;
use crate::flow::{AnswerKind, ExercisePlan, Question};
use crate::models::nutrition::{DailyLog, Meal};

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Onboarding questionnaire
pub fn sample_questionnaire() -> Vec<Question> {
    vec![
        Question::new(
            "goal",
            "What is your main goal?",
            "goals",
            AnswerKind::SingleChoice {
                options: labels(&["Lose fat", "Build muscle", "Get stronger", "Stay healthy"]),
            },
        ),
        Question::new(
            "training_days",
            "Which days can you train?",
            "schedule",
            AnswerKind::MultiChoice {
                options: labels(&["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]),
            },
        ),
        Question::new(
            "experience",
            "How experienced are you with weight training?",
            "profile",
            AnswerKind::Scale {
                labels: labels(&["Never", "Beginner", "Intermediate", "Advanced", "Athlete"]),
            },
        ),
        Question::new(
            "body_weight",
            "What is your current body weight?",
            "profile",
            AnswerKind::Slider {
                min: 40.0,
                max: 160.0,
                step: 0.5,
                unit: "kg".to_string(),
            },
        ),
        Question::new(
            "focus",
            "Which areas do you want to focus on?",
            "goals",
            AnswerKind::MultiChoice {
                options: labels(&["Chest", "Back", "Legs", "Shoulders", "Arms", "Core"]),
            },
        ),
        Question::new(
            "sleep",
            "How many hours do you usually sleep?",
            "recovery",
            AnswerKind::Slider {
                min: 3.0,
                max: 12.0,
                step: 0.5,
                unit: "h".to_string(),
            },
        ),
    ]
}

// name, sets, reps, reference kg, rest seconds
const WORKOUT_TABLE: &[(&str, usize, &str, f64, Option<u32>)] = &[
    ("Barbell Squat", 4, "6-8", 80.0, Some(120)),
    ("Bench Press", 4, "8-10", 60.0, Some(120)),
    ("Bent-Over Row", 3, "8-12", 50.0, None),
    ("Overhead Press", 3, "8-10", 35.0, None),
    ("Lateral Raise", 3, "12-15", 8.0, Some(60)),
    ("Cable Crunch", 3, "15-20", 25.0, Some(60)),
];

/// Today's workout, rest durations resolved against the config
pub fn sample_workout(config: &WorkoutConfig) -> Vec<ExercisePlan> {
    WORKOUT_TABLE
        .iter()
        .map(|&(name, sets, reps, weight, rest)| {
            ExercisePlan::new(name, sets, reps, weight).with_rest_secs(config.rest_for(name, rest))
        })
        .collect()
}

/// Today's meal plan
pub fn sample_meals(calorie_goal: u32) -> DailyLog {
    DailyLog::new(
        vec![
            Meal::new("Oats with banana", "07:30", 420, (18.0, 68.0, 9.0)),
            Meal::new("Greek yogurt & nuts", "10:30", 280, (20.0, 14.0, 16.0)),
            Meal::new("Chicken, rice & beans", "13:00", 680, (52.0, 80.0, 14.0)),
            Meal::new("Whey shake", "16:30", 180, (30.0, 6.0, 3.0)),
            Meal::new("Salmon & sweet potato", "20:00", 610, (42.0, 55.0, 22.0)),
        ],
        calorie_goal,
    )
}
