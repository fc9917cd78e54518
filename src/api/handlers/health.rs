use axum::{extract::State, Json};
use std::sync::Arc;

use super::super::state::AppState;
use crate::models::HealthResponse;

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    // Tenths of a second are plenty for an uptime readout
    let uptime = (state.started_at.elapsed().as_secs_f64() * 10.0).round() / 10.0;

    Json(HealthResponse {
        status: "ok".to_string(),
        uptime,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
