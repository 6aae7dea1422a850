//! Summary screen implementation
//!
//! Shows the output of the last finished flow: the questionnaire answer map
//! or the workout completion record.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Paragraph, Row, Table},
    Frame,
};
use serde::Serialize;

use crate::app::theme::{self, NEON_CYAN, NEON_GREEN, NEON_MAGENTA, NEON_YELLOW};
use crate::flow::{QuestionnaireSummary, WorkoutSummary};
use crate::util::units::{format_elapsed, format_weight};

/// Output of a finished flow
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "flow", rename_all = "snake_case")]
pub enum SessionSummary {
    Questionnaire(QuestionnaireSummary),
    Workout(WorkoutSummary),
}

/// Summary screen component
#[derive(Debug, Default)]
pub struct SummaryScreen {
    summary: Option<SessionSummary>,
}

impl SummaryScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_summary(&mut self, summary: SessionSummary) {
        self.summary = Some(summary);
    }

    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    /// Render the summary screen
    pub fn render(&self, f: &mut Frame, glow: Color) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(8),    // Body
                Constraint::Length(3), // Help
            ])
            .split(f.size());

        f.render_widget(theme::header("Session Summary", glow), chunks[0]);
        match &self.summary {
            Some(SessionSummary::Questionnaire(summary)) => {
                self.render_answers(f, chunks[1], summary)
            }
            Some(SessionSummary::Workout(summary)) => self.render_workout(f, chunks[1], summary),
            None => {
                let empty = Paragraph::new(vec![
                    Line::from(""),
                    Line::from("Nothing finished yet."),
                    Line::from("Complete the questionnaire or a workout first."),
                ])
                .alignment(Alignment::Center)
                .block(theme::neon_block("Summary", NEON_CYAN));
                f.render_widget(empty, chunks[1]);
            }
        }
        f.render_widget(theme::help_line(&[("Enter/Esc", "Home")]), chunks[2]);
    }

    fn render_answers(&self, f: &mut Frame, area: Rect, summary: &QuestionnaireSummary) {
        let rows: Vec<Row> = summary
            .answers
            .iter()
            .map(|(id, value)| Row::new(vec![id.clone(), value.display()]))
            .collect();
        let table = Table::new(rows, [Constraint::Length(18), Constraint::Min(20)])
            .header(
                Row::new(vec!["Question", "Answer"])
                    .style(Style::default().fg(NEON_YELLOW).add_modifier(Modifier::BOLD)),
            )
            .block(theme::neon_block(
                "Your Answers",
                NEON_MAGENTA,
            ))
            .column_spacing(2);
        f.render_widget(table, area);
    }

    fn render_workout(&self, f: &mut Frame, area: Rect, summary: &WorkoutSummary) {
        let elapsed = (summary.finished_at - summary.started_at)
            .to_std()
            .unwrap_or_default();

        let mut rows = vec![
            Row::new(vec![
                "Sets".to_string(),
                format!("{} / {}", summary.completed_sets(), summary.target_sets()),
            ]),
            Row::new(vec![
                "Volume".to_string(),
                format_weight(summary.total_volume()),
            ]),
            Row::new(vec!["Duration".to_string(), format_elapsed(elapsed)]),
            Row::new(vec!["".to_string(), "".to_string()]),
        ];
        rows.extend(summary.exercises.iter().map(|exercise| {
            let style = if exercise.completed_sets == exercise.target_sets {
                Style::default().fg(NEON_GREEN)
            } else {
                Style::default().fg(NEON_YELLOW)
            };
            Row::new(vec![
                exercise.name.clone(),
                format!("{} / {} sets", exercise.completed_sets, exercise.target_sets),
            ])
            .style(style)
        }));

        let title = if summary.forced {
            "Workout (finished early)"
        } else {
            "Workout Complete"
        };
        let table = Table::new(rows, [Constraint::Length(22), Constraint::Min(20)])
            .block(theme::neon_block(title, NEON_GREEN))
            .column_spacing(2);
        f.render_widget(table, area);
    }
}
