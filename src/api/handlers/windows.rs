//! Window listing, lookup and management

use axum::{extract::State, Json};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use super::super::extract::{JsonBody, QueryParams};
use super::super::state::AppState;
use super::dispatch;
use crate::batch::Action;
use crate::control::WindowRef;
use crate::desktop::{Placement, WindowHandle};
use crate::error::{ControlError, Result};
use crate::models::{
    ActiveWindowResponse, FindWindowQuery, FindWindowResponse, SuccessResponse, WaitWindowRequest,
    WaitWindowResponse, WindowHandleResponse, WindowJson, WindowListResponse, WindowMoveRequest,
    WindowResizeRequest, WindowTarget,
};

pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<WindowListResponse>> {
    let windows: Vec<WindowJson> = state
        .blocking(|d| d.drivers().windows.list_windows())
        .await?
        .into_iter()
        .map(WindowJson::from)
        .collect();

    Ok(Json(WindowListResponse {
        success: true,
        count: windows.len(),
        windows,
    }))
}

pub async fn active(State(state): State<Arc<AppState>>) -> Result<Json<ActiveWindowResponse>> {
    let window = state
        .blocking(|d| d.drivers().windows.foreground_window())
        .await?;
    Ok(Json(ActiveWindowResponse {
        success: true,
        window: window.map(WindowJson::from),
    }))
}

pub async fn focus(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<WindowTarget>,
) -> Result<Json<Value>> {
    tracing::debug!("Window focus: hwnd={:?} title={:?}", req.hwnd, req.title);
    dispatch(&state, Action::Focus(req)).await
}

async fn place(
    state: &AppState,
    req: WindowTarget,
    placement: Placement,
) -> Result<Json<WindowHandleResponse>> {
    let window = WindowRef::from_parts(req.hwnd, req.title.as_deref())?;
    let handle = state
        .blocking(move |d| d.resolver().set_placement(&window, placement))
        .await?;
    Ok(Json(WindowHandleResponse {
        success: true,
        hwnd: handle.0,
    }))
}

pub async fn minimize(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<WindowTarget>,
) -> Result<Json<WindowHandleResponse>> {
    place(&state, req, Placement::Minimize).await
}

pub async fn maximize(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<WindowTarget>,
) -> Result<Json<WindowHandleResponse>> {
    place(&state, req, Placement::Maximize).await
}

pub async fn restore(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<WindowTarget>,
) -> Result<Json<WindowHandleResponse>> {
    place(&state, req, Placement::Restore).await
}

pub async fn close(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<WindowTarget>,
) -> Result<Json<WindowHandleResponse>> {
    let window = WindowRef::from_parts(req.hwnd, req.title.as_deref())?;
    let handle = state
        .blocking(move |d| d.resolver().close(&window))
        .await?;
    tracing::info!("Window close: hwnd={} title={:?}", handle, req.title);

    Ok(Json(WindowHandleResponse {
        success: true,
        hwnd: handle.0,
    }))
}

fn required_handle(hwnd: i64) -> Result<WindowHandle> {
    if hwnd == 0 {
        return Err(ControlError::invalid("'hwnd' is required"));
    }
    Ok(WindowHandle(hwnd))
}

pub async fn move_window(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<WindowMoveRequest>,
) -> Result<Json<SuccessResponse>> {
    let handle = required_handle(req.hwnd)?;
    state
        .blocking(move |d| d.resolver().move_window(handle, req.x, req.y))
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

pub async fn resize(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<WindowResizeRequest>,
) -> Result<Json<SuccessResponse>> {
    let handle = required_handle(req.hwnd)?;
    state
        .blocking(move |d| d.resolver().resize_window(handle, req.width, req.height))
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

pub async fn find(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<FindWindowQuery>,
) -> Result<Json<FindWindowResponse>> {
    let found = state
        .blocking(move |d| d.resolver().find_by_title(&query.title))
        .await?;
    Ok(Json(found.map_or_else(FindWindowResponse::missing, FindWindowResponse::from)))
}

/// Poll for a window by title until it appears or the timeout elapses
pub async fn wait(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<WaitWindowRequest>,
) -> Result<Json<WaitWindowResponse>> {
    if req.title.is_empty() {
        return Err(ControlError::invalid("'title' is required"));
    }
    let timeout = Duration::try_from_secs_f64(req.timeout)
        .map_err(|_| ControlError::invalid(format!("Invalid timeout: {}", req.timeout)))?;

    let info = state
        .blocking(move |d| d.resolver().wait_for_window(&req.title, timeout))
        .await?;

    Ok(Json(WaitWindowResponse {
        success: true,
        hwnd: info.handle.0,
        title: info.title,
    }))
}
