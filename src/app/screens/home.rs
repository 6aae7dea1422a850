//! Home screen implementation
//!
//! Main menu with Questionnaire, Workout, Diet and Quit entries.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::theme::{self, NEON_CYAN, NEON_MAGENTA};

/// Entries of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeItem {
    Questionnaire,
    Workout,
    Diet,
    Quit,
}

impl HomeItem {
    pub fn all() -> [HomeItem; 4] {
        [
            HomeItem::Questionnaire,
            HomeItem::Workout,
            HomeItem::Diet,
            HomeItem::Quit,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            HomeItem::Questionnaire => "Fitness Questionnaire",
            HomeItem::Workout => "Today's Workout",
            HomeItem::Diet => "Meal Plan",
            HomeItem::Quit => "Quit",
        }
    }
}

/// Home screen component with menu selection
#[derive(Debug)]
pub struct HomeScreen {
    selected_index: usize,
    list_state: ListState,
}

impl HomeScreen {
    /// Create a new home screen
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            selected_index: 0,
            list_state,
        }
    }

    /// Get the currently selected entry
    pub fn selected_item(&self) -> HomeItem {
        HomeItem::all()[self.selected_index]
    }

    /// Move selection up, wrapping to the last entry
    pub fn select_previous(&mut self) {
        let len = HomeItem::all().len();
        self.selected_index = (self.selected_index + len - 1) % len;
        self.list_state.select(Some(self.selected_index));
    }

    /// Move selection down, wrapping to the first entry
    pub fn select_next(&mut self) {
        self.selected_index = (self.selected_index + 1) % HomeItem::all().len();
        self.list_state.select(Some(self.selected_index));
    }

    /// Render the home screen
    pub fn render(&mut self, f: &mut Frame, glow: Color) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Title and subtitle
                Constraint::Min(8),    // Menu
                Constraint::Length(3), // Help text
            ])
            .split(f.size());

        self.render_title(f, chunks[0], glow);
        self.render_menu(f, chunks[1]);
        f.render_widget(
            theme::help_line(&[("↑↓", "Navigate"), ("Enter", "Open"), ("Q", "Quit")]),
            chunks[2],
        );
    }

    fn render_title(&self, f: &mut Frame, area: Rect, glow: Color) {
        let title_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(2)])
            .split(area);

        f.render_widget(theme::header("P U L S E F I T", glow), title_chunks[0]);

        let subtitle = Paragraph::new("Train. Track. Recover.")
            .style(Style::default().fg(NEON_MAGENTA))
            .alignment(Alignment::Center);
        f.render_widget(subtitle, title_chunks[1]);
    }

    fn render_menu(&mut self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = HomeItem::all()
            .iter()
            .map(|item| ListItem::new(item.label()))
            .collect();

        let list = List::new(items)
            .block(theme::neon_block("Menu", NEON_CYAN))
            .highlight_style(
                Style::default()
                    .bg(NEON_CYAN)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_screen_creation() {
        let screen = HomeScreen::new();
        assert_eq!(screen.selected_item(), HomeItem::Questionnaire);
    }

    #[test]
    fn test_menu_navigation() {
        let mut screen = HomeScreen::new();
        screen.select_next();
        assert_eq!(screen.selected_item(), HomeItem::Workout);
        screen.select_next();
        screen.select_next();
        assert_eq!(screen.selected_item(), HomeItem::Quit);

        // Wraps to the beginning
        screen.select_next();
        assert_eq!(screen.selected_item(), HomeItem::Questionnaire);
    }

    #[test]
    fn test_menu_navigation_up() {
        let mut screen = HomeScreen::new();
        screen.select_previous();
        assert_eq!(screen.selected_item(), HomeItem::Quit);
        screen.select_previous();
        assert_eq!(screen.selected_item(), HomeItem::Diet);
    }
}
