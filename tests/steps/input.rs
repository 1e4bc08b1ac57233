//! Step definitions for user input

use crate::common::world::HourlineWorld;
use crossterm::event::{KeyCode, KeyModifiers};
use cucumber::when;
use std::time::Duration;
use tracing::info;

#[when(expr = "I search for matrícula {string}")]
async fn when_search(world: &mut HourlineWorld, matricula: String) {
    info!("Searching for {}", matricula);
    world
        .start_search(&matricula)
        .await
        .expect("Failed to start search");
    world
        .wait_for_lookup()
        .await
        .expect("Lookup did not settle");
}

#[when(expr = "I start a search for matrícula {string}")]
async fn when_start_search(world: &mut HourlineWorld, matricula: String) {
    world
        .start_search(&matricula)
        .await
        .expect("Failed to start search");
}

#[when(expr = "I type {string}")]
async fn when_type(world: &mut HourlineWorld, text: String) {
    world.type_text(&text).await.expect("Failed to type");
}

#[when(expr = "I paste {string}")]
async fn when_paste(world: &mut HourlineWorld, text: String) {
    world.paste(&text).await.expect("Failed to paste");
}

#[when("I press Backspace")]
async fn when_backspace(world: &mut HourlineWorld) {
    world
        .send_key(KeyCode::Backspace, KeyModifiers::NONE)
        .await
        .expect("Failed to press Backspace");
}

#[when("I press Ctrl-L")]
async fn when_clear_cache(world: &mut HourlineWorld) {
    world
        .send_key(KeyCode::Char('l'), KeyModifiers::CONTROL)
        .await
        .expect("Failed to press Ctrl-L");
}

#[when(expr = "I wait {int} milliseconds")]
async fn when_wait(world: &mut HourlineWorld, millis: u64) {
    world
        .wait(Duration::from_millis(millis))
        .await
        .expect("Failed to service timers");
}
