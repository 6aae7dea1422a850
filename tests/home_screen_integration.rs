//! Menu navigation and screen routing

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pulsefit::app::{screens::HomeItem, App, AppState, HomeScreen, NavigationAction, StateManager};
use pulsefit::config::AppConfig;

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

#[test]
fn test_home_menu_wraps() {
    let mut home = HomeScreen::new();
    assert_eq!(home.selected_item(), HomeItem::Questionnaire);
    home.select_previous();
    assert_eq!(home.selected_item(), HomeItem::Quit);
    home.select_next();
    home.select_next();
    assert_eq!(home.selected_item(), HomeItem::Workout);
}

#[test]
fn test_state_manager_integration() {
    let mut state_manager = StateManager::new();
    assert_eq!(state_manager.current_state(), AppState::Home);

    state_manager.transition_to(AppState::Workout);
    assert_eq!(state_manager.previous_state(), Some(AppState::Home));
    state_manager.go_back();
    assert_eq!(state_manager.current_state(), AppState::Home);

    assert!(!state_manager.handle_global(NavigationAction::Up));
    assert!(state_manager.handle_global(NavigationAction::Back));
    assert!(state_manager.should_quit());
}

#[test]
fn test_questionnaire_completion_shows_summary() {
    let config = AppConfig::default().with_require_answer(false);
    let mut app = App::new(config);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.state(), AppState::Questionnaire);

    let count = app.questionnaire_screen().unwrap().flow().questions().len();
    for _ in 0..count {
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);
    }

    assert_eq!(app.state(), AppState::Summary);
    assert!(app.questionnaire_screen().is_none());
    let summary = serde_json::to_value(app.summary().unwrap()).unwrap();
    assert_eq!(summary["flow"], "questionnaire");
    assert_eq!(summary["answers"].as_object().unwrap().len(), count);
}

#[test]
fn test_escape_on_home_quits() {
    let mut app = App::new(AppConfig::default());
    press(&mut app, KeyCode::Esc);
    assert!(app.should_quit());
}
