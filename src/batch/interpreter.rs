use serde::Serialize;
use serde_json::Value;
use std::panic::{self, AssertUnwindSafe};

use super::action::Action;
use super::dispatcher::{ActionData, Dispatcher};
use crate::error::{panic_message, ControlError};

/// Outcome of one batch step. `data` is flattened into the object.
#[derive(Debug, Clone, Serialize)]
pub struct ActionResult {
    pub index: usize,
    pub success: bool,
    #[serde(flatten)]
    pub data: ActionData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResult {
    pub fn succeeded(index: usize, data: ActionData) -> Self {
        Self {
            index,
            success: true,
            data,
            error: None,
        }
    }

    pub fn failed(index: usize, error: impl Into<String>) -> Self {
        Self {
            index,
            success: false,
            data: ActionData::new(),
            error: Some(error.into()),
        }
    }
}

/// Run every step in order, one result per step.
///
/// A step that fails to parse, fails in the driver or panics produces a
/// failed result; the next step runs regardless.
pub fn run_batch(dispatcher: &Dispatcher, actions: &[Value]) -> Vec<ActionResult> {
    tracing::debug!("Running batch of {} actions", actions.len());

    actions
        .iter()
        .enumerate()
        .map(|(index, raw)| run_step(dispatcher, index, raw))
        .collect()
}

fn run_step(dispatcher: &Dispatcher, index: usize, raw: &Value) -> ActionResult {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let action = Action::parse(raw)?;
        dispatcher.execute(action)
    }))
    .unwrap_or_else(|payload| Err(ControlError::Internal(panic_message(payload.as_ref()))));

    match outcome {
        Ok(data) => ActionResult::succeeded(index, data),
        Err(e) => {
            tracing::warn!("Batch step {} failed: {}", index, e);
            ActionResult::failed(index, e.to_string())
        }
    }
}
