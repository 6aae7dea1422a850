//! Diet screen implementation
//!
//! The day's meal plan with eaten marks, calorie goal gauge and macro split.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Gauge, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::theme::{self, NEON_CYAN, NEON_GREEN, NEON_MAGENTA, NEON_YELLOW};
use crate::models::DailyLog;
use crate::util::units::format_percent;

/// Diet screen component
#[derive(Debug)]
pub struct DietScreen {
    log: DailyLog,
    selected_index: usize,
    list_state: ListState,
}

impl DietScreen {
    pub fn new(log: DailyLog) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            log,
            selected_index: 0,
            list_state,
        }
    }

    pub fn log(&self) -> &DailyLog {
        &self.log
    }

    pub fn select_previous(&mut self) {
        if self.log.meals.is_empty() {
            return;
        }
        let len = self.log.meals.len();
        self.selected_index = (self.selected_index + len - 1) % len;
        self.list_state.select(Some(self.selected_index));
    }

    pub fn select_next(&mut self) {
        if self.log.meals.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.log.meals.len();
        self.list_state.select(Some(self.selected_index));
    }

    /// Flip the eaten mark of the highlighted meal
    pub fn toggle_selected(&mut self) {
        self.log.toggle_eaten(self.selected_index);
    }

    /// Render the diet screen
    pub fn render(&mut self, f: &mut Frame, glow: Color) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Calorie gauge
                Constraint::Min(7),    // Meals
                Constraint::Length(3), // Macros
                Constraint::Length(3), // Help
            ])
            .split(f.size());

        f.render_widget(theme::header("Meal Plan", glow), chunks[0]);
        self.render_calories(f, chunks[1]);
        self.render_meals(f, chunks[2]);
        self.render_macros(f, chunks[3]);
        f.render_widget(
            theme::help_line(&[("↑↓", "Move"), ("Space", "Eaten"), ("Esc", "Home")]),
            chunks[4],
        );
    }

    fn render_calories(&self, f: &mut Frame, area: Rect) {
        let percentage = self.log.goal_percentage();
        let gauge = Gauge::default()
            .block(theme::neon_block("Calories", NEON_CYAN))
            .gauge_style(Style::default().fg(if percentage > 1.0 {
                NEON_YELLOW
            } else {
                NEON_GREEN
            }))
            .ratio(percentage.clamp(0.0, 1.0))
            .label(format!(
                "{} / {} kcal ({})",
                self.log.total_calories(),
                self.log.calorie_goal,
                format_percent(percentage)
            ));
        f.render_widget(gauge, area);
    }

    fn render_meals(&mut self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .log
            .meals
            .iter()
            .map(|meal| {
                let check = if meal.eaten { "[x]" } else { "[ ]" };
                let style = if meal.eaten {
                    Style::default().fg(NEON_GREEN)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(format!(
                    "{} {}  {:<24} {:>5} kcal",
                    check, meal.time, meal.name, meal.calories
                ))
                .style(style)
            })
            .collect();

        let list = List::new(items)
            .block(theme::neon_block("Meals", NEON_CYAN))
            .highlight_style(Style::default().bg(NEON_CYAN).fg(Color::Black))
            .highlight_symbol(">> ");
        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_macros(&self, f: &mut Frame, area: Rect) {
        let breakdown = self.log.macro_breakdown();
        let line = Line::from(vec![
            Span::styled(
                format!("Protein {:.0}%", breakdown.protein_pct),
                Style::default().fg(NEON_MAGENTA),
            ),
            Span::raw("   "),
            Span::styled(
                format!("Carbs {:.0}%", breakdown.carbs_pct),
                Style::default().fg(NEON_CYAN),
            ),
            Span::raw("   "),
            Span::styled(
                format!("Fat {:.0}%", breakdown.fat_pct),
                Style::default().fg(NEON_YELLOW),
            ),
        ]);
        let macros = Paragraph::new(line)
            .alignment(ratatui::layout::Alignment::Center)
            .block(theme::neon_block("Macros", NEON_MAGENTA));
        f.render_widget(macros, area);
    }
}
