use axum::{extract::State, Json};
use std::sync::Arc;

use super::super::extract::JsonBody;
use super::super::state::AppState;
use crate::desktop::screenshot::to_png_base64;
use crate::error::{ControlError, Result};
use crate::models::{ClipboardTextResponse, ImageResponse, SuccessResponse, TextRequest};

pub async fn get_text(State(state): State<Arc<AppState>>) -> Result<Json<ClipboardTextResponse>> {
    let text = state
        .blocking(|d| d.drivers().clipboard.get_text())
        .await?
        .unwrap_or_default();
    Ok(Json(ClipboardTextResponse {
        success: true,
        text,
    }))
}

pub async fn set_text(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<TextRequest>,
) -> Result<Json<SuccessResponse>> {
    state
        .blocking(move |d| d.drivers().clipboard.set_text(&req.text))
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

pub async fn clear(State(state): State<Arc<AppState>>) -> Result<Json<SuccessResponse>> {
    state.blocking(|d| d.drivers().clipboard.clear()).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Clipboard image re-encoded as base64 PNG
pub async fn get_image(State(state): State<Arc<AppState>>) -> Result<Json<ImageResponse>> {
    let image = state
        .blocking(|d| match d.drivers().clipboard.get_image()? {
            Some(image) => to_png_base64(&image),
            None => Err(ControlError::NotFound("No image in clipboard".to_string())),
        })
        .await?;

    Ok(Json(ImageResponse {
        success: true,
        image,
        format: "png",
    }))
}
