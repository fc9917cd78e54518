use axum::{extract::State, Json};
use serde_json::Value;
use std::sync::Arc;

use super::super::extract::JsonBody;
use super::super::state::AppState;
use super::dispatch;
use crate::batch::Action;
use crate::error::Result;
use crate::models::{HotkeyRequest, KeyRequest, TextRequest, TypeRequest};

/// First few characters of typed text, for logs
fn preview(text: &str) -> String {
    text.chars().take(50).collect()
}

pub async fn type_text(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<TypeRequest>,
) -> Result<Json<Value>> {
    tracing::debug!("Keyboard type: {}", preview(&req.text));
    dispatch(&state, Action::Type(req)).await
}

pub async fn press(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<KeyRequest>,
) -> Result<Json<Value>> {
    tracing::debug!("Keyboard press: {}", req.key);
    dispatch(&state, Action::Press(req)).await
}

pub async fn hotkey(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<HotkeyRequest>,
) -> Result<Json<Value>> {
    tracing::debug!("Keyboard hotkey: {}", req.keys.join("+"));
    dispatch(&state, Action::Hotkey(req)).await
}

pub async fn key_down(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<KeyRequest>,
) -> Result<Json<Value>> {
    tracing::debug!("Keyboard key down: {}", req.key);
    dispatch(&state, Action::KeyDown(req)).await
}

pub async fn key_up(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<KeyRequest>,
) -> Result<Json<Value>> {
    tracing::debug!("Keyboard key up: {}", req.key);
    dispatch(&state, Action::KeyUp(req)).await
}

pub async fn write_instant(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<TextRequest>,
) -> Result<Json<Value>> {
    tracing::debug!("Keyboard write instant: {}", preview(&req.text));
    dispatch(&state, Action::WriteInstant(req)).await
}
