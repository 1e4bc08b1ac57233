//! Step definitions for the mock hours API

use crate::common::world::HourlineWorld;
use cucumber::given;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

#[given(expr = "the hours API reports {int} hours for matrícula {string}")]
async fn given_hours(world: &mut HourlineWorld, total: u32, matricula: String) {
    debug!("Mounting {} hours for {}", total, matricula);
    let body = json!({
        "totalGeral": total,
        "status": "Regular",
        "categorias": [{ "nome": "Monitoria", "horas": total }]
    });
    world
        .mount_response(&matricula, 200, Some(body), Duration::ZERO)
        .await;
}

#[given(expr = "the hours API reports {int} hours without categories for matrícula {string}")]
async fn given_hours_without_categories(world: &mut HourlineWorld, total: u32, matricula: String) {
    let body = json!({ "totalGeral": total, "status": "Regular", "categorias": [] });
    world
        .mount_response(&matricula, 200, Some(body), Duration::ZERO)
        .await;
}

#[given(expr = "the hours API answers matrícula {string} with {int} hours after {int} milliseconds")]
async fn given_slow_hours(world: &mut HourlineWorld, matricula: String, total: u32, delay: u64) {
    let body = json!({
        "totalGeral": total,
        "status": "Regular",
        "categorias": [{ "nome": "Pesquisa", "horas": total }]
    });
    world
        .mount_response(&matricula, 200, Some(body), Duration::from_millis(delay))
        .await;
}

#[given(expr = "the hours API responds with status {int} for matrícula {string}")]
async fn given_status(world: &mut HourlineWorld, status: u16, matricula: String) {
    world
        .mount_response(&matricula, status, None, Duration::ZERO)
        .await;
}

#[given(expr = "the hours API rejects matrícula {string} with message {string}")]
async fn given_api_error(world: &mut HourlineWorld, matricula: String, message: String) {
    let body = json!({ "error": true, "message": message });
    world
        .mount_response(&matricula, 200, Some(body), Duration::ZERO)
        .await;
}

#[given(expr = "matrícula {string} was searched in a previous session")]
async fn given_remembered(world: &mut HourlineWorld, matricula: String) {
    world.remembered_identifier = Some(matricula);
}
