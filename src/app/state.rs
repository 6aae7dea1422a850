//! Application state management
//!
//! Handles screen transitions, navigation logic, and keyboard event processing
//! for the TUI application.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Application screens/states
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppState {
    /// Main menu
    #[default]
    Home,
    /// Guided questionnaire
    Questionnaire,
    /// Workout session with rest countdown
    Workout,
    /// Daily meal plan
    Diet,
    /// Result of the last finished flow
    Summary,
}

impl AppState {
    /// Title shown in the screen header
    pub fn title(&self) -> &'static str {
        match self {
            AppState::Home => "PULSEFIT",
            AppState::Questionnaire => "Questionnaire",
            AppState::Workout => "Workout",
            AppState::Diet => "Diet",
            AppState::Summary => "Summary",
        }
    }
}

/// Navigation actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    /// Move selection up (arrow up, k)
    Up,
    /// Move selection down (arrow down, j)
    Down,
    /// Move selection left (arrow left, h)
    Left,
    /// Move selection right (arrow right, l)
    Right,
    /// Confirm (Enter)
    Select,
    /// Toggle the highlighted item (Space)
    Toggle,
    /// Go back/cancel (Esc, Backspace)
    Back,
    /// Next item (Tab)
    Next,
    /// Previous item (Shift+Tab)
    Previous,
    /// Quit application (q, Q, Ctrl+C)
    Quit,
    /// Screen-specific letter command
    Command(char),
    /// No action
    None,
}

/// Application state manager
#[derive(Debug)]
pub struct StateManager {
    current_state: AppState,
    previous_state: Option<AppState>,
    should_quit: bool,
}

impl StateManager {
    /// Create a new state manager starting at the main menu
    pub fn new() -> Self {
        Self {
            current_state: AppState::Home,
            previous_state: None,
            should_quit: false,
        }
    }

    /// Get the current application state
    pub fn current_state(&self) -> AppState {
        self.current_state
    }

    /// Get the previous state if available
    pub fn previous_state(&self) -> Option<AppState> {
        self.previous_state
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Set the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Transition to a new state
    pub fn transition_to(&mut self, new_state: AppState) {
        if new_state != self.current_state {
            self.previous_state = Some(self.current_state);
            self.current_state = new_state;
        }
    }

    /// Go back to the previous state if available, otherwise go Home
    pub fn go_back(&mut self) {
        self.current_state = self.previous_state.take().unwrap_or(AppState::Home);
    }

    /// Apply the actions every screen shares
    ///
    /// Returns true when the action was consumed.
    pub fn handle_global(&mut self, action: NavigationAction) -> bool {
        match (action, self.current_state) {
            (NavigationAction::Quit, _) | (NavigationAction::Back, AppState::Home) => {
                self.should_quit = true;
                true
            }
            _ => false,
        }
    }

    /// Convert keyboard event to navigation action
    pub fn key_to_navigation(key: KeyEvent) -> NavigationAction {
        match key.code {
            // Quit keys
            KeyCode::Char('q') | KeyCode::Char('Q') => NavigationAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                NavigationAction::Quit
            }

            // Navigation keys
            KeyCode::Up | KeyCode::Char('k') => NavigationAction::Up,
            KeyCode::Down | KeyCode::Char('j') => NavigationAction::Down,
            KeyCode::Left | KeyCode::Char('h') => NavigationAction::Left,
            KeyCode::Right | KeyCode::Char('l') => NavigationAction::Right,

            KeyCode::Enter => NavigationAction::Select,
            KeyCode::Char(' ') => NavigationAction::Toggle,

            // Back/cancel
            KeyCode::Esc | KeyCode::Backspace => NavigationAction::Back,

            // Tab navigation
            KeyCode::BackTab => NavigationAction::Previous,
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    NavigationAction::Previous
                } else {
                    NavigationAction::Next
                }
            }

            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                NavigationAction::Command(c.to_ascii_lowercase())
            }

            _ => NavigationAction::None,
        }
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}
