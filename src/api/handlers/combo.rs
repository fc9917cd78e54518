use axum::{extract::State, Json};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::super::extract::JsonBody;
use super::super::state::AppState;
use crate::batch::run_batch;
use crate::control::{keyboard, mouse};
use crate::desktop::{Key, MouseButton};
use crate::error::Result;
use crate::models::{BatchRequest, BatchResponse, ClickAndTypeRequest, SuccessResponse};

/// Pause after select-all so the target field registers it before typing
const SELECT_ALL_SETTLE: Duration = Duration::from_millis(20);

/// Click (when both coordinates are given), optionally select-all, then type
pub async fn click_and_type(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<ClickAndTypeRequest>,
) -> Result<Json<SuccessResponse>> {
    tracing::debug!(
        "Combo click+type at ({:?},{:?}): {}",
        req.x,
        req.y,
        req.text.chars().take(50).collect::<String>()
    );

    state
        .blocking(move |d| {
            let input = d.drivers().input.as_ref();

            if let (Some(x), Some(y)) = (req.x, req.y) {
                mouse::click(input, Some(x), Some(y), MouseButton::Left, 1)?;
            }
            if req.clear_first {
                keyboard::hotkey(input, &[Key::primary_modifier(), Key::Char('a')])?;
                thread::sleep(SELECT_ALL_SETTLE);
            }
            keyboard::type_text(input, &req.text, mouse::seconds(req.interval)?)
        })
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// Execute a list of actions in order, one result per action
pub async fn batch(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<BatchRequest>,
) -> Result<Json<BatchResponse>> {
    let results = state
        .blocking(move |d| Ok(run_batch(d, &req.actions)))
        .await?;

    Ok(Json(BatchResponse {
        success: true,
        results,
    }))
}
