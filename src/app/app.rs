//! Main application controller
//!
//! Owns the screens, routes key events, mounts and unmounts flow screens and
//! feeds the rest ticker into the workout session.

use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use ratatui::Frame;
use tracing::{info, warn};

use crate::{
    app::{
        screens::{
            DietScreen, EntryKind, HomeItem, HomeScreen, QuestionnaireScreen, SessionSummary,
            SummaryScreen, WorkoutScreen,
        },
        state::{AppState, NavigationAction, StateManager},
        theme,
        tui::Tui,
    },
    config::AppConfig,
    flow::{RestTicker, WorkoutSummary},
    models::{sample_meals, sample_questionnaire, sample_workout},
    util::glow_level,
    Result,
};

/// Period of one rest countdown step
pub const REST_TICK: Duration = Duration::from_secs(1);

/// TUI application controller
pub struct App {
    config: AppConfig,
    state_manager: StateManager,
    home_screen: HomeScreen,
    /// Flow screens exist only while mounted
    questionnaire_screen: Option<QuestionnaireScreen>,
    workout_screen: Option<WorkoutScreen>,
    diet_screen: Option<DietScreen>,
    summary_screen: SummaryScreen,
    rest_ticker: Option<RestTicker>,
    started: Instant,
}

impl App {
    /// Create a new application instance
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            state_manager: StateManager::new(),
            home_screen: HomeScreen::new(),
            questionnaire_screen: None,
            workout_screen: None,
            diet_screen: None,
            summary_screen: SummaryScreen::new(),
            rest_ticker: None,
            started: Instant::now(),
        }
    }

    pub fn state(&self) -> AppState {
        self.state_manager.current_state()
    }

    pub fn should_quit(&self) -> bool {
        self.state_manager.should_quit()
    }

    pub fn questionnaire_screen(&self) -> Option<&QuestionnaireScreen> {
        self.questionnaire_screen.as_ref()
    }

    pub fn workout_screen(&self) -> Option<&WorkoutScreen> {
        self.workout_screen.as_ref()
    }

    pub fn diet_screen(&self) -> Option<&DietScreen> {
        self.diet_screen.as_ref()
    }

    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary_screen.summary()
    }

    /// Whether a rest ticker task is running
    pub fn is_ticking(&self) -> bool {
        self.rest_ticker.is_some()
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new(self.config.ui.tick_rate())?;
        tui.init()?;
        info!("terminal ui started");

        while !self.state_manager.should_quit() {
            tui.draw(|f| self.render(f))?;
            if let Some(key) = tui.next_key()? {
                self.handle_key(key);
            }
            self.process_ticks();
            tokio::task::yield_now().await;
        }

        self.unmount_flows();
        tui.restore()?;
        info!("terminal ui stopped");
        Ok(())
    }

    /// Draw the current screen
    fn render(&mut self, f: &mut Frame) {
        let glow = theme::glow_color(glow_level(self.started.elapsed()));
        match self.state_manager.current_state() {
            AppState::Questionnaire => {
                if let Some(screen) = self.questionnaire_screen.as_mut() {
                    return screen.render(f, glow);
                }
            }
            AppState::Workout => {
                if let Some(screen) = self.workout_screen.as_mut() {
                    return screen.render(f, glow);
                }
            }
            AppState::Diet => {
                if let Some(screen) = self.diet_screen.as_mut() {
                    return screen.render(f, glow);
                }
            }
            AppState::Summary => return self.summary_screen.render(f, glow),
            AppState::Home => {}
        }
        self.home_screen.render(f, glow);
    }

    /// Handle one key press and update state
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Text entry receives raw keys so letters like 'q' are typed, not commands
        if self.state_manager.current_state() == AppState::Workout {
            if let Some(screen) = self.workout_screen.as_mut() {
                if screen.is_capturing_text() {
                    screen.handle_entry_key(key);
                    return;
                }
            }
        }

        let action = StateManager::key_to_navigation(key);
        if self.state_manager.handle_global(action) {
            return;
        }

        match self.state_manager.current_state() {
            AppState::Home => self.handle_home(action),
            AppState::Questionnaire => self.handle_questionnaire(action),
            AppState::Workout => self.handle_workout(action),
            AppState::Diet => self.handle_diet(action),
            AppState::Summary => self.handle_summary(action),
        }
        self.sync_ticker();
    }

    /// Apply rest ticks that arrived since the last call
    pub fn process_ticks(&mut self) {
        let Some(ticker) = self.rest_ticker.as_mut() else {
            return;
        };
        let ticks = ticker.drain();
        if let Some(screen) = self.workout_screen.as_mut() {
            for _ in 0..ticks {
                screen.tick();
            }
        }
        self.sync_ticker();
    }

    /// Run the ticker exactly while the mounted workout is resting
    fn sync_ticker(&mut self) {
        let resting = self
            .workout_screen
            .as_ref()
            .is_some_and(|screen| screen.session().is_resting());
        match (resting, self.rest_ticker.is_some()) {
            (true, false) => self.rest_ticker = Some(RestTicker::spawn(REST_TICK)),
            (false, true) => self.rest_ticker = None,
            _ => {}
        }
    }

    fn open(&mut self, item: HomeItem) {
        let state = match item {
            HomeItem::Questionnaire => {
                self.questionnaire_screen = Some(QuestionnaireScreen::new(
                    sample_questionnaire(),
                    self.config.questionnaire.require_answer,
                ));
                AppState::Questionnaire
            }
            HomeItem::Workout => {
                self.workout_screen =
                    Some(WorkoutScreen::new(sample_workout(&self.config.workout)));
                AppState::Workout
            }
            HomeItem::Diet => {
                self.diet_screen = Some(DietScreen::new(sample_meals(
                    self.config.diet.calorie_goal,
                )));
                AppState::Diet
            }
            HomeItem::Quit => {
                self.state_manager.quit();
                return;
            }
        };
        info!(screen = state.title(), "screen mounted");
        self.state_manager.transition_to(state);
    }

    /// Drop every flow screen together with any pending ticker
    fn unmount_flows(&mut self) {
        self.questionnaire_screen = None;
        self.workout_screen = None;
        self.diet_screen = None;
        self.rest_ticker = None;
    }

    fn leave_to_home(&mut self) {
        info!(screen = self.state_manager.current_state().title(), "screen unmounted");
        self.unmount_flows();
        self.state_manager.go_back();
    }

    fn show_summary(&mut self, summary: SessionSummary) {
        match serde_json::to_string(&summary) {
            Ok(json) => info!(summary = %json, "session finished"),
            Err(e) => warn!(error = %e, "could not serialize session summary"),
        }
        self.unmount_flows();
        self.summary_screen.set_summary(summary);
        self.state_manager.transition_to(AppState::Summary);
    }

    fn handle_home(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::Up => self.home_screen.select_previous(),
            NavigationAction::Down => self.home_screen.select_next(),
            NavigationAction::Select | NavigationAction::Toggle => {
                let item = self.home_screen.selected_item();
                self.open(item);
            }
            _ => {}
        }
    }

    fn handle_questionnaire(&mut self, action: NavigationAction) {
        if action == NavigationAction::Back {
            self.leave_to_home();
            return;
        }
        let Some(screen) = self.questionnaire_screen.as_mut() else {
            return;
        };
        match action {
            NavigationAction::Up => screen.select_previous(),
            NavigationAction::Down => screen.select_next(),
            NavigationAction::Left => screen.adjust(-1),
            NavigationAction::Right => screen.adjust(1),
            NavigationAction::Toggle => screen.choose(),
            NavigationAction::Select | NavigationAction::Next => screen.next(),
            NavigationAction::Previous => screen.previous(),
            _ => {}
        }
        if screen.is_completed() {
            let summary = screen.summary();
            self.show_summary(SessionSummary::Questionnaire(summary));
        }
    }

    fn handle_workout(&mut self, action: NavigationAction) {
        let Some(screen) = self.workout_screen.as_mut() else {
            self.leave_to_home();
            return;
        };

        let finished: Option<WorkoutSummary> = if screen.is_confirming() {
            match action {
                NavigationAction::Command('y') => screen.confirm(true),
                NavigationAction::Command('n') | NavigationAction::Back => screen.confirm(false),
                _ => None,
            }
        } else {
            match action {
                NavigationAction::Up => screen.select_previous(),
                NavigationAction::Down => screen.select_next(),
                NavigationAction::Left | NavigationAction::Previous => screen.previous_exercise(),
                NavigationAction::Right | NavigationAction::Next => screen.next_exercise(),
                NavigationAction::Select | NavigationAction::Toggle => {
                    // A new rest restarts the countdown, so its ticks restart too
                    if screen.toggle_selected_set().is_some() {
                        self.rest_ticker = None;
                    }
                }
                NavigationAction::Command('s') => screen.skip_rest(),
                NavigationAction::Command('e') => screen.begin_entry(EntryKind::Performance),
                NavigationAction::Command('d') => screen.begin_entry(EntryKind::Dropset),
                NavigationAction::Command('f') => return self.finish_workout_request(),
                NavigationAction::Back => return self.leave_to_home(),
                _ => {}
            }
            None
        };

        if let Some(summary) = finished {
            self.show_summary(SessionSummary::Workout(summary));
        }
    }

    fn finish_workout_request(&mut self) {
        let summary = self
            .workout_screen
            .as_mut()
            .and_then(WorkoutScreen::request_finish);
        if let Some(summary) = summary {
            self.show_summary(SessionSummary::Workout(summary));
        }
    }

    fn handle_diet(&mut self, action: NavigationAction) {
        if action == NavigationAction::Back {
            self.leave_to_home();
            return;
        }
        if let Some(screen) = self.diet_screen.as_mut() {
            match action {
                NavigationAction::Up => screen.select_previous(),
                NavigationAction::Down => screen.select_next(),
                NavigationAction::Select | NavigationAction::Toggle => screen.toggle_selected(),
                _ => {}
            }
        }
    }

    fn handle_summary(&mut self, action: NavigationAction) {
        if matches!(action, NavigationAction::Select | NavigationAction::Back) {
            self.state_manager.transition_to(AppState::Home);
        }
    }
}
