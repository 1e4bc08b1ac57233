//! Step definitions for assertions on the rendered widget

use crate::common::world::HourlineWorld;
use cucumber::then;
use hourline::repl::views::CategoryRow;
use hourline::UiState;

#[then(expr = "the screen should show {string}")]
async fn then_screen_shows(world: &mut HourlineWorld, text: String) {
    let content = world.screen_text().await.expect("No screen");
    assert!(
        content.contains(&text),
        "Expected screen to contain {text:?}, got:\n{content}"
    );
}

#[then(expr = "the screen should not show {string}")]
async fn then_screen_hides(world: &mut HourlineWorld, text: String) {
    let content = world.screen_text().await.expect("No screen");
    assert!(
        !content.contains(&text),
        "Expected screen not to contain {text:?}, got:\n{content}"
    );
}

#[then(expr = "the widget should be in the {word} state")]
async fn then_state(world: &mut HourlineWorld, state: String) {
    let expected = match state.as_str() {
        "idle" => UiState::Idle,
        "loading" => UiState::Loading,
        "success" => UiState::Success,
        "error" => UiState::Error,
        other => panic!("Unknown state {other}"),
    };
    assert_eq!(world.state().await.expect("No app"), expected);
}

#[then("the results panel should be hidden")]
async fn then_results_hidden(world: &mut HourlineWorld) {
    let screen = world.screen().await.expect("No screen");
    assert!(!screen.layout().results_visible);
}

#[then("the search control should be disabled")]
async fn then_search_disabled(world: &mut HourlineWorld) {
    let screen = world.screen().await.expect("No screen");
    assert!(!screen.layout().search_enabled);
    assert!(screen.layout().busy);
}

#[then(expr = "the progress bar should be {int} percent full")]
async fn then_progress_fill(world: &mut HourlineWorld, percent: u32) {
    let screen = world.screen().await.expect("No screen");
    let progress = screen.progress().expect("No progress bar");
    assert!(
        (progress.fill_percent - f64::from(percent)).abs() < 1e-9,
        "Expected fill {percent}, got {}",
        progress.fill_percent
    );
}

#[then("the category list should hold a single placeholder row")]
async fn then_single_placeholder(world: &mut HourlineWorld) {
    let screen = world.screen().await.expect("No screen");
    let categories = screen.categories();
    assert_eq!(categories.len(), 1);
    assert!(matches!(categories[0], CategoryRow::Placeholder(_)));
}

#[then(expr = "the input should read {string}")]
async fn then_input(world: &mut HourlineWorld, text: String) {
    let app = world.app().await.expect("No app");
    assert_eq!(app.input(), text);
}
