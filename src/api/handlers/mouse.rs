use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use super::super::extract::JsonBody;
use super::super::state::AppState;
use super::dispatch;
use crate::batch::Action;
use crate::control::mouse;
use crate::desktop::{MouseButton, Point};
use crate::error::Result;
use crate::models::{
    ClickRequest, DragRequest, MoveRelativeRequest, MoveRequest, PointerRequest, PositionResponse,
    ScrollRequest, SuccessResponse,
};

pub async fn position(State(state): State<Arc<AppState>>) -> Result<Json<PositionResponse>> {
    let pos = state.blocking(|d| d.drivers().input.position()).await?;
    Ok(Json(PositionResponse { x: pos.x, y: pos.y }))
}

pub async fn move_to(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<MoveRequest>,
) -> Result<Json<Value>> {
    tracing::debug!("Mouse move to ({}, {})", req.x, req.y);
    dispatch(&state, Action::Move(req)).await
}

pub async fn move_relative(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<MoveRelativeRequest>,
) -> Result<Json<Value>> {
    tracing::debug!("Mouse move relative ({}, {})", req.dx, req.dy);
    let pos = state
        .blocking(move |d| {
            mouse::move_relative(
                d.drivers().input.as_ref(),
                req.dx,
                req.dy,
                mouse::seconds(req.duration)?,
            )
        })
        .await?;
    Ok(Json(json!({"success": true, "x": pos.x, "y": pos.y})))
}

pub async fn click(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<ClickRequest>,
) -> Result<Json<Value>> {
    tracing::debug!(
        "Mouse click at ({:?}, {:?}) button={} clicks={}",
        req.x,
        req.y,
        req.button,
        req.clicks
    );
    dispatch(&state, Action::Click(req)).await
}

pub async fn double_click(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<PointerRequest>,
) -> Result<Json<Value>> {
    dispatch(&state, Action::DoubleClick(req)).await
}

pub async fn right_click(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<PointerRequest>,
) -> Result<Json<Value>> {
    dispatch(&state, Action::RightClick(req)).await
}

/// Jump to the start point, then drag to the end point
pub async fn drag(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<DragRequest>,
) -> Result<Json<SuccessResponse>> {
    let button: MouseButton = req.button.parse()?;
    tracing::debug!(
        "Mouse drag ({},{}) -> ({},{})",
        req.start_x,
        req.start_y,
        req.end_x,
        req.end_y
    );

    state
        .blocking(move |d| {
            mouse::drag(
                d.drivers().input.as_ref(),
                Point::new(req.start_x, req.start_y),
                Point::new(req.end_x, req.end_y),
                mouse::seconds(req.duration)?,
                button,
            )
        })
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

pub async fn scroll(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<ScrollRequest>,
) -> Result<Json<Value>> {
    tracing::debug!("Mouse scroll {} at ({:?}, {:?})", req.clicks, req.x, req.y);
    dispatch(&state, Action::Scroll(req)).await
}
