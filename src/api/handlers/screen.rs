//! Screen size, pixel reads and screenshots

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use std::path::PathBuf;
use std::sync::Arc;

use super::super::extract::{JsonBody, QueryParams};
use super::super::state::AppState;
use crate::control::screen;
use crate::desktop::{Region, Rgb};
use crate::error::{ErrorResponse, Result};
use crate::models::{
    ImageResponse, PathResponse, PixelQuery, RegionRequest, ScreenSizeResponse,
    ScreenshotFileRequest, ScreenshotQuery,
};

pub async fn size(State(state): State<Arc<AppState>>) -> Result<Json<ScreenSizeResponse>> {
    let (width, height) = state.blocking(|d| d.drivers().display.screen_size()).await?;
    Ok(Json(ScreenSizeResponse { width, height }))
}

pub async fn pixel(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<PixelQuery>,
) -> Result<Json<Rgb>> {
    let color = state
        .blocking(move |d| d.drivers().display.pixel(query.x, query.y))
        .await?;
    Ok(Json(color))
}

pub async fn screenshot(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<ScreenshotQuery>,
) -> Result<Response> {
    if query.format.as_deref().is_some_and(|f| f != "base64") {
        return Ok(Json(ErrorResponse::new("Use format=base64")).into_response());
    }

    let quality = query
        .quality
        .unwrap_or(state.config.screenshot_quality)
        .clamp(1, 100);
    let image = state
        .blocking(move |d| screen::capture_base64(d.drivers().display.as_ref(), None, quality))
        .await?;

    Ok(Json(ImageResponse {
        success: true,
        image,
        format: "jpeg",
    })
    .into_response())
}

pub async fn region(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<RegionRequest>,
) -> Result<Json<ImageResponse>> {
    let quality = req
        .quality
        .unwrap_or(state.config.screenshot_quality)
        .clamp(1, 100);
    let region = Region {
        x: req.x,
        y: req.y,
        width: req.width,
        height: req.height,
    };

    let image = state
        .blocking(move |d| {
            screen::capture_base64(d.drivers().display.as_ref(), Some(region), quality)
        })
        .await?;

    Ok(Json(ImageResponse {
        success: true,
        image,
        format: "jpeg",
    }))
}

/// Save a PNG screenshot to disk, at the configured path unless one is given
pub async fn to_file(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<ScreenshotFileRequest>,
) -> Result<Json<PathResponse>> {
    let path = req
        .path
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| state.config.screenshot_path.clone());

    let saved = path.clone();
    state
        .blocking(move |d| screen::capture_to_file(d.drivers().display.as_ref(), &saved))
        .await?;
    tracing::debug!("Screenshot saved to {}", path.display());

    Ok(Json(PathResponse {
        success: true,
        path: path.display().to_string(),
    }))
}
