pub mod clipboard;
pub mod combo;
pub mod health;
pub mod keyboard;
pub mod mouse;
pub mod screen;
pub mod windows;

use axum::Json;
use serde_json::{Map, Value};

use super::state::AppState;
use crate::batch::{Action, ActionData};
use crate::error::Result;

/// Run one action through the dispatcher and answer `{success: true, ...data}`
pub(crate) async fn dispatch(state: &AppState, action: Action) -> Result<Json<Value>> {
    let data = state.blocking(move |d| d.execute(action)).await?;
    Ok(success_with(data))
}

pub(crate) fn success_with(data: ActionData) -> Json<Value> {
    let mut body = Map::new();
    body.insert("success".to_string(), Value::Bool(true));
    body.extend(data);
    Json(Value::Object(body))
}
