//! Questionnaire screen implementation
//!
//! Hosts a [`Questionnaire`] flow: option highlighting, slider adjustment,
//! answer gating and the progress bar.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::theme::{self, DIM, NEON_CYAN, NEON_GREEN, NEON_MAGENTA, NEON_YELLOW};
use crate::error::user_friendly_message;
use crate::flow::{AnswerKind, AnswerValue, Question, Questionnaire, QuestionnaireSummary};

/// Questionnaire screen component
#[derive(Debug)]
pub struct QuestionnaireScreen {
    flow: Questionnaire,
    require_answer: bool,
    highlight: usize,
    list_state: ListState,
    slider_value: f64,
    status: Option<String>,
}

impl QuestionnaireScreen {
    /// Mount the screen with a fresh flow over `questions`
    pub fn new(questions: Vec<Question>, require_answer: bool) -> Self {
        let mut screen = Self {
            flow: Questionnaire::new(questions),
            require_answer,
            highlight: 0,
            list_state: ListState::default(),
            slider_value: 0.0,
            status: None,
        };
        screen.sync_to_question();
        screen
    }

    pub fn flow(&self) -> &Questionnaire {
        &self.flow
    }

    pub fn is_completed(&self) -> bool {
        self.flow.is_completed()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn highlight(&self) -> usize {
        self.highlight
    }

    pub fn slider_value(&self) -> f64 {
        self.slider_value
    }

    /// Snapshot of the answers for the summary screen
    pub fn summary(&self) -> QuestionnaireSummary {
        self.flow.clone().into_summary()
    }

    /// Reset highlight and slider to reflect the current question's answer
    fn sync_to_question(&mut self) {
        self.highlight = 0;
        if let Some(question) = self.flow.current_question() {
            let answer = self.flow.answer(&question.id);
            match (&question.kind, answer) {
                (AnswerKind::SingleChoice { options }, Some(AnswerValue::Single(label))) => {
                    self.highlight = options.iter().position(|o| o == label).unwrap_or(0);
                }
                (AnswerKind::Scale { labels }, Some(AnswerValue::Number(n))) => {
                    let position = (*n as usize).clamp(1, labels.len().max(1));
                    self.highlight = position - 1;
                }
                (AnswerKind::Slider { .. }, Some(AnswerValue::Number(n))) => {
                    self.slider_value = *n;
                }
                (AnswerKind::Slider { min, max, step, .. }, _) => {
                    let midpoint = (min + max) / 2.0;
                    self.slider_value = if *step > 0.0 {
                        min + ((midpoint - min) / step).round() * step
                    } else {
                        midpoint
                    };
                }
                _ => {}
            }
        }
        self.list_state.select(Some(self.highlight));
    }

    fn option_count(&self) -> usize {
        self.flow
            .current_question()
            .map_or(0, |q| q.kind.options().len())
    }

    /// Move the highlight up, wrapping
    pub fn select_previous(&mut self) {
        let count = self.option_count();
        if count == 0 {
            return;
        }
        self.highlight = (self.highlight + count - 1) % count;
        self.list_state.select(Some(self.highlight));
    }

    /// Move the highlight down, wrapping
    pub fn select_next(&mut self) {
        let count = self.option_count();
        if count == 0 {
            return;
        }
        self.highlight = (self.highlight + 1) % count;
        self.list_state.select(Some(self.highlight));
    }

    /// Left/Right: step a slider or move along a scale, recording the value
    pub fn adjust(&mut self, direction: i32) {
        let Some(question) = self.flow.current_question() else {
            return;
        };
        let id = question.id.clone();
        match &question.kind {
            AnswerKind::Slider { min, max, step, .. } => {
                let value = (self.slider_value + f64::from(direction) * step).clamp(*min, *max);
                self.slider_value = value;
                self.flow.set_number(&id, value);
                self.status = None;
            }
            AnswerKind::Scale { labels } if !labels.is_empty() => {
                let last = labels.len() as i32 - 1;
                self.highlight = (self.highlight as i32 + direction).clamp(0, last) as usize;
                self.list_state.select(Some(self.highlight));
                self.flow.set_number(&id, (self.highlight + 1) as f64);
                self.status = None;
            }
            _ => {}
        }
    }

    /// Record the highlighted option (or the slider value)
    pub fn choose(&mut self) {
        let Some(question) = self.flow.current_question() else {
            return;
        };
        let id = question.id.clone();
        match &question.kind {
            AnswerKind::SingleChoice { options } => {
                if let Some(label) = options.get(self.highlight).cloned() {
                    self.flow.select_option(&id, &label);
                }
            }
            AnswerKind::MultiChoice { options } => {
                if let Some(label) = options.get(self.highlight).cloned() {
                    self.flow.toggle_option(&id, &label);
                }
            }
            AnswerKind::Scale { labels } => {
                if self.highlight < labels.len() {
                    self.flow.set_number(&id, (self.highlight + 1) as f64);
                }
            }
            AnswerKind::Slider { .. } => {
                let value = self.slider_value;
                self.flow.set_number(&id, value);
            }
        }
        self.status = None;
    }

    /// Move to the next question, gated on an answer when configured
    pub fn next(&mut self) {
        if self.require_answer {
            if let Err(e) = self.flow.try_advance() {
                self.status = Some(user_friendly_message(&e));
                return;
            }
        } else {
            self.flow.advance();
        }
        self.status = None;
        self.sync_to_question();
    }

    /// Move to the previous question
    pub fn previous(&mut self) {
        self.flow.retreat();
        self.status = None;
        self.sync_to_question();
    }

    /// Render the questionnaire screen
    pub fn render(&mut self, f: &mut Frame, glow: Color) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Progress
                Constraint::Length(4), // Prompt
                Constraint::Min(6),    // Answer area
                Constraint::Length(3), // Status
                Constraint::Length(3), // Help
            ])
            .split(f.size());

        f.render_widget(theme::header("Fitness Questionnaire", glow), chunks[0]);
        self.render_progress(f, chunks[1]);

        let Some(question) = self.flow.current_question().cloned() else {
            let done = Paragraph::new("All questions answered. Press Enter for the summary.")
                .alignment(Alignment::Center)
                .block(theme::neon_block("Done", NEON_GREEN));
            f.render_widget(done, chunks[2]);
            return;
        };

        let prompt = Paragraph::new(vec![
            Line::from(Span::styled(
                question.prompt.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("#{}", question.category),
                Style::default().fg(NEON_MAGENTA),
            )),
        ])
        .wrap(Wrap { trim: true })
        .block(theme::neon_block("Question", NEON_CYAN));
        f.render_widget(prompt, chunks[2]);

        match &question.kind {
            AnswerKind::Slider {
                min, max, unit, ..
            } => self.render_slider(f, chunks[3], *min, *max, unit),
            _ => self.render_options(f, chunks[3], &question),
        }

        self.render_status(f, chunks[4]);
        f.render_widget(
            theme::help_line(&[
                ("↑↓", "Move"),
                ("←→", "Adjust"),
                ("Space", "Select"),
                ("Enter", "Next"),
                ("Shift+Tab", "Back"),
                ("Esc", "Home"),
            ]),
            chunks[5],
        );
    }

    fn render_progress(&self, f: &mut Frame, area: Rect) {
        let total = self.flow.questions().len();
        let position = (self.flow.current_index() + 1).min(total);
        let gauge = Gauge::default()
            .block(theme::neon_block("Progress", NEON_CYAN))
            .gauge_style(Style::default().fg(NEON_MAGENTA))
            .ratio(self.flow.progress_fraction().clamp(0.0, 1.0))
            .label(format!("Question {} of {}", position, total));
        f.render_widget(gauge, area);
    }

    fn render_options(&mut self, f: &mut Frame, area: Rect, question: &Question) {
        let answer = self.flow.answer(&question.id);
        let items: Vec<ListItem> = question
            .kind
            .options()
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let chosen = match answer {
                    Some(AnswerValue::Single(value)) => value == label,
                    Some(AnswerValue::Multiple(set)) => set.contains(label),
                    Some(AnswerValue::Number(n)) => *n as usize == i + 1,
                    None => false,
                };
                let marker = match (&question.kind, chosen) {
                    (AnswerKind::MultiChoice { .. }, true) => "[x]",
                    (AnswerKind::MultiChoice { .. }, false) => "[ ]",
                    (_, true) => "(•)",
                    (_, false) => "( )",
                };
                let style = if chosen {
                    Style::default().fg(NEON_GREEN)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(format!("{} {}", marker, label)).style(style)
            })
            .collect();

        let list = List::new(items)
            .block(theme::neon_block("Answer", NEON_CYAN))
            .highlight_style(Style::default().bg(NEON_CYAN).fg(Color::Black))
            .highlight_symbol(">> ");
        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_slider(&self, f: &mut Frame, area: Rect, min: f64, max: f64, unit: &str) {
        let span = (max - min).max(f64::EPSILON);
        let ratio = ((self.slider_value - min) / span).clamp(0.0, 1.0);
        let gauge = Gauge::default()
            .block(theme::neon_block("Answer", NEON_CYAN))
            .gauge_style(Style::default().fg(NEON_GREEN))
            .ratio(ratio)
            .label(format!("{} {}  ({} to {})", self.slider_value, unit, min, max));
        f.render_widget(gauge, area);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let (text, color) = match &self.status {
            Some(message) => (message.clone(), NEON_YELLOW),
            None => ("Choose an answer to continue.".to_string(), DIM),
        };
        let status = Paragraph::new(text)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .block(theme::neon_block("Status", color));
        f.render_widget(status, area);
    }
}
