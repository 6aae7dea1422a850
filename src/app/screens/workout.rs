//! Workout screen implementation
//!
//! Hosts a [`WorkoutSession`]: set checklist for the current exercise, rest
//! countdown gauge, performance/dropset entry and the finish confirmation.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Row, Table, TableState},
    Frame,
};
use tracing::debug;

use crate::app::theme::{self, DIM, NEON_CYAN, NEON_GREEN, NEON_MAGENTA, NEON_YELLOW};
use crate::error::user_friendly_message;
use crate::flow::{ExercisePlan, RestEvent, SetOutcome, WorkoutSession, WorkoutSummary};
use crate::util::units::{format_countdown, format_weight};
use crate::PulseError;

/// What the text entry line is collecting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Performance,
    Dropset,
}

/// Free-text "weight reps" entry for the selected set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub kind: EntryKind,
    pub buffer: String,
}

/// Workout screen component
#[derive(Debug)]
pub struct WorkoutScreen {
    session: WorkoutSession,
    selected_set: usize,
    table_state: TableState,
    /// Duration of the rest currently running, for the gauge ratio
    rest_total: u32,
    entry: Option<Entry>,
    /// Remaining set count while the finish confirmation is shown
    confirm_finish: Option<usize>,
    status: Option<String>,
}

impl WorkoutScreen {
    /// Mount the screen with a fresh session over `plan`
    pub fn new(plan: Vec<ExercisePlan>) -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));
        Self {
            session: WorkoutSession::new(plan),
            selected_set: 0,
            table_state,
            rest_total: 0,
            entry: None,
            confirm_finish: None,
            status: None,
        }
    }

    pub fn session(&self) -> &WorkoutSession {
        &self.session
    }

    pub fn selected_set(&self) -> usize {
        self.selected_set
    }

    pub fn entry(&self) -> Option<&Entry> {
        self.entry.as_ref()
    }

    pub fn is_confirming(&self) -> bool {
        self.confirm_finish.is_some()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Whether raw key input should bypass navigation mapping
    pub fn is_capturing_text(&self) -> bool {
        self.entry.is_some()
    }

    fn set_count(&self) -> usize {
        self.session
            .current_exercise()
            .map_or(0, |exercise| exercise.target_sets)
    }

    /// Move the set highlight up, clamped
    pub fn select_previous(&mut self) {
        self.selected_set = self.selected_set.saturating_sub(1);
        self.table_state.select(Some(self.selected_set));
    }

    /// Move the set highlight down, clamped
    pub fn select_next(&mut self) {
        if self.selected_set + 1 < self.set_count() {
            self.selected_set += 1;
        }
        self.table_state.select(Some(self.selected_set));
    }

    pub fn next_exercise(&mut self) {
        self.session.next_exercise();
        self.reset_selection();
    }

    pub fn previous_exercise(&mut self) {
        self.session.previous_exercise();
        self.reset_selection();
    }

    fn reset_selection(&mut self) {
        self.selected_set = 0;
        self.table_state.select(Some(0));
        self.status = None;
    }

    /// Complete the highlighted set, or clear it when already complete
    ///
    /// Returns the rest duration when the toggle started a new rest.
    pub fn toggle_selected_set(&mut self) -> Option<u32> {
        let exercise = self.session.current_index();
        let set = self.selected_set;
        let already = self
            .session
            .sets(exercise)
            .and_then(|sets| sets.get(set))
            .is_some_and(|record| record.completed);

        let mut rest_started = None;
        let result = if already {
            self.session
                .uncomplete_set(exercise, set)
                .map(|_| "Set unmarked.".to_string())
        } else {
            self.session.complete_set(exercise, set).map(|outcome| {
                match outcome {
                    SetOutcome::Completed { rest: Some(secs) } => {
                        self.rest_total = secs;
                        rest_started = Some(secs);
                        format!("Set {} done. Rest {}.", set + 1, format_countdown(secs))
                    }
                    SetOutcome::Completed { rest: None } => "Exercise complete!".to_string(),
                    SetOutcome::AlreadyComplete => "Set already complete.".to_string(),
                }
            })
        };

        match result {
            Ok(message) => {
                self.status = Some(message);
                if !already {
                    self.select_next();
                }
            }
            Err(e) => self.status = Some(user_friendly_message(&e)),
        }
        rest_started
    }

    /// Feed one rest tick
    pub fn tick(&mut self) {
        if let Some(RestEvent::Finished) = self.session.tick() {
            self.status = Some("Rest complete. Next set!".to_string());
        }
    }

    pub fn skip_rest(&mut self) {
        if self.session.is_resting() {
            self.session.skip_rest();
            self.status = Some("Rest skipped.".to_string());
        }
    }

    /// Open the entry line for the highlighted set
    pub fn begin_entry(&mut self, kind: EntryKind) {
        if self.set_count() == 0 {
            return;
        }
        self.entry = Some(Entry {
            kind,
            buffer: String::new(),
        });
    }

    /// Route a raw key into the entry line
    pub fn handle_entry_key(&mut self, key: KeyEvent) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) => entry.buffer.push(c),
            KeyCode::Backspace => {
                entry.buffer.pop();
            }
            KeyCode::Esc => self.entry = None,
            KeyCode::Enter => self.apply_entry(),
            _ => {}
        }
    }

    /// Store "weight reps" from the entry line; bad numbers fall back to 0
    fn apply_entry(&mut self) {
        let Some(entry) = self.entry.take() else {
            return;
        };
        let mut parts = entry.buffer.split_whitespace();
        let weight = parts.next().unwrap_or("");
        let reps = parts.next().unwrap_or("");
        let exercise = self.session.current_index();
        let set = self.selected_set;

        let result = match entry.kind {
            EntryKind::Performance => self.session.log_performance(exercise, set, weight, reps),
            EntryKind::Dropset => self.session.record_dropset(exercise, set, weight, reps),
        };
        self.status = Some(match result {
            Ok(()) => format!("Set {} updated.", set + 1),
            Err(e) => user_friendly_message(&e),
        });
    }

    /// Try to finish; remaining sets open the confirmation instead
    pub fn request_finish(&mut self) -> Option<WorkoutSummary> {
        match self.session.finish(false) {
            Ok(summary) => Some(summary),
            Err(PulseError::IncompleteWorkout(remaining)) => {
                debug!(remaining, "finish needs confirmation");
                self.status = Some(user_friendly_message(&PulseError::IncompleteWorkout(
                    remaining,
                )));
                self.confirm_finish = Some(remaining);
                None
            }
            Err(e) => {
                self.status = Some(user_friendly_message(&e));
                None
            }
        }
    }

    /// Answer the finish confirmation
    pub fn confirm(&mut self, accept: bool) -> Option<WorkoutSummary> {
        self.confirm_finish.take()?;
        if !accept {
            self.status = Some("Keep going!".to_string());
            return None;
        }
        match self.session.finish(true) {
            Ok(summary) => Some(summary),
            Err(e) => {
                self.status = Some(user_friendly_message(&e));
                None
            }
        }
    }

    /// Render the workout screen
    pub fn render(&mut self, f: &mut Frame, glow: Color) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(4), // Exercise info
                Constraint::Min(6),    // Sets table
                Constraint::Length(3), // Rest gauge
                Constraint::Length(3), // Status / entry
                Constraint::Length(3), // Help
            ])
            .split(f.size());

        let title = format!(
            "Exercise {} of {}",
            (self.session.current_index() + 1).min(self.session.plan().len()),
            self.session.plan().len()
        );
        f.render_widget(theme::header(&title, glow), chunks[0]);

        self.render_exercise(f, chunks[1]);
        self.render_sets(f, chunks[2]);
        self.render_rest(f, chunks[3], glow);
        self.render_status(f, chunks[4]);

        let help = if self.confirm_finish.is_some() {
            theme::help_line(&[("Y", "Finish anyway"), ("N", "Keep training")])
        } else if self.entry.is_some() {
            theme::help_line(&[("Enter", "Save"), ("Esc", "Cancel")])
        } else {
            theme::help_line(&[
                ("↑↓", "Set"),
                ("←→", "Exercise"),
                ("Space", "Done"),
                ("E", "Log"),
                ("D", "Dropset"),
                ("S", "Skip rest"),
                ("F", "Finish"),
            ])
        };
        f.render_widget(help, chunks[5]);
    }

    fn render_exercise(&self, f: &mut Frame, area: Rect) {
        let lines = match self.session.current_exercise() {
            Some(exercise) => vec![
                Line::from(Span::styled(
                    exercise.name.clone(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![
                    Span::styled(
                        format!("{} sets x {} reps", exercise.target_sets, exercise.rep_range),
                        Style::default().fg(NEON_MAGENTA),
                    ),
                    Span::raw("  |  "),
                    Span::styled(
                        format!("ref {}", format_weight(exercise.reference_weight)),
                        Style::default().fg(NEON_CYAN),
                    ),
                    Span::raw("  |  "),
                    Span::styled(
                        format!("rest {}", format_countdown(exercise.rest_secs)),
                        Style::default().fg(DIM),
                    ),
                ]),
            ],
            None => vec![Line::from("No exercises planned for today.")],
        };
        let info = Paragraph::new(lines).block(theme::neon_block("Exercise", NEON_CYAN));
        f.render_widget(info, area);
    }

    fn render_sets(&mut self, f: &mut Frame, area: Rect) {
        let exercise = self.session.current_index();
        let rows: Vec<Row> = self
            .session
            .sets(exercise)
            .unwrap_or(&[])
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let check = if record.completed { "[x]" } else { "[ ]" };
                let performed = match (record.weight, record.reps) {
                    (Some(w), Some(r)) => format!("{} x {}", format_weight(w), r),
                    _ => "-".to_string(),
                };
                let dropset = record
                    .dropset
                    .map(|d| format!("{} x {}", format_weight(d.weight), d.reps))
                    .unwrap_or_default();
                let style = if record.completed {
                    Style::default().fg(NEON_GREEN)
                } else {
                    Style::default().fg(Color::White)
                };
                Row::new(vec![
                    format!("{} Set {}", check, i + 1),
                    performed,
                    dropset,
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Length(16),
                Constraint::Min(10),
            ],
        )
        .header(
            Row::new(vec!["Set", "Performed", "Dropset"])
                .style(Style::default().fg(NEON_YELLOW).add_modifier(Modifier::BOLD)),
        )
        .block(theme::neon_block("Sets", NEON_CYAN))
        .highlight_style(Style::default().bg(NEON_CYAN).fg(Color::Black))
        .highlight_symbol(">> ")
        .column_spacing(2);

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_rest(&self, f: &mut Frame, area: Rect, glow: Color) {
        let (ratio, label, color) = if self.session.is_resting() {
            let remaining = self.session.rest_remaining();
            let total = self.rest_total.max(remaining).max(1);
            (
                f64::from(remaining) / f64::from(total),
                format!("Resting {}", format_countdown(remaining)),
                glow,
            )
        } else {
            (0.0, "Ready".to_string(), DIM)
        };
        let gauge = Gauge::default()
            .block(theme::neon_block("Rest", color))
            .gauge_style(Style::default().fg(NEON_MAGENTA))
            .ratio(ratio.clamp(0.0, 1.0))
            .label(label);
        f.render_widget(gauge, area);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let (text, color, title) = if let Some(entry) = &self.entry {
            let title = match entry.kind {
                EntryKind::Performance => "Weight Reps",
                EntryKind::Dropset => "Dropset Weight Reps",
            };
            (format!("{}_", entry.buffer), NEON_YELLOW, title)
        } else if let Some(message) = &self.status {
            let color = if self.confirm_finish.is_some() {
                NEON_YELLOW
            } else {
                NEON_GREEN
            };
            (message.clone(), color, "Status")
        } else {
            (
                format!("{} sets remaining", self.session.remaining_sets()),
                DIM,
                "Status",
            )
        };
        let status = Paragraph::new(text)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .block(theme::neon_block(title, color));
        f.render_widget(status, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn screen() -> WorkoutScreen {
        WorkoutScreen::new(vec![
            ExercisePlan::new("Squat", 2, "5", 100.0).with_rest_secs(120),
            ExercisePlan::new("Curl", 1, "10", 12.0).with_rest_secs(60),
        ])
    }

    fn type_text(screen: &mut WorkoutScreen, text: &str) {
        for c in text.chars() {
            screen.handle_entry_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        screen.handle_entry_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    }

    #[test]
    fn test_toggle_completes_and_rests() {
        let mut screen = screen();
        screen.toggle_selected_set();
        assert!(screen.session().is_resting());
        assert_eq!(screen.session().rest_remaining(), 120);
        assert_eq!(screen.selected_set(), 1);

        screen.skip_rest();
        assert!(!screen.session().is_resting());
        assert_eq!(screen.status(), Some("Rest skipped."));
    }

    #[test]
    fn test_toggle_twice_unmarks() {
        let mut screen = screen();
        screen.toggle_selected_set();
        screen.select_previous();
        screen.toggle_selected_set();
        assert!(!screen.session().sets(0).unwrap()[0].completed);
    }

    #[test]
    fn test_tick_reports_rest_complete() {
        let mut screen = screen();
        screen.next_exercise();
        screen.previous_exercise();
        screen.toggle_selected_set();
        for _ in 0..120 {
            screen.tick();
        }
        assert!(!screen.session().is_resting());
        assert_eq!(screen.status(), Some("Rest complete. Next set!"));
    }

    #[test]
    fn test_entry_logs_performance() {
        let mut screen = screen();
        screen.begin_entry(EntryKind::Performance);
        assert!(screen.is_capturing_text());
        type_text(&mut screen, "102,5 5");
        assert!(!screen.is_capturing_text());
        let record = screen.session().sets(0).unwrap()[0];
        assert_eq!(record.weight, Some(102.5));
        assert_eq!(record.reps, Some(5));
    }

    #[test]
    fn test_dropset_entry_on_open_set_reports_error() {
        let mut screen = screen();
        screen.begin_entry(EntryKind::Dropset);
        type_text(&mut screen, "80 6");
        assert!(screen.session().sets(0).unwrap()[0].dropset.is_none());
        assert_eq!(
            screen.status(),
            Some("Complete the set before adding a dropset.")
        );
    }

    #[test]
    fn test_finish_confirmation_flow() {
        let mut screen = screen();
        assert!(screen.request_finish().is_none());
        assert!(screen.is_confirming());

        assert!(screen.confirm(false).is_none());
        assert!(!screen.is_confirming());

        screen.request_finish();
        let summary = screen.confirm(true).expect("forced finish");
        assert!(summary.forced);
        assert_eq!(summary.completed_sets(), 0);
    }

    #[test]
    fn test_finish_without_confirmation_when_done() {
        let mut screen = screen();
        screen.toggle_selected_set();
        screen.toggle_selected_set();
        screen.next_exercise();
        screen.toggle_selected_set();
        let summary = screen.request_finish().expect("all sets done");
        assert!(!summary.forced);
        assert_eq!(summary.completed_sets(), 3);
    }
}
