use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::any::Any;
use thiserror::Error;

/// Every failure a driver call, the dispatcher or a route can produce.
///
/// The `Display` text is what callers see in the `error` field, so variants
/// carry the finished message rather than a prefix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    /// Window or clipboard-image lookup missed
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Unknown action type: {0}")]
    UnknownAction(String),

    #[error("{0}")]
    Timeout(String),

    /// The OS rejected the operation
    #[error("{0}")]
    Driver(String),

    /// Both the direct and the thread-input focus requests were refused
    #[error("{0}")]
    FocusDenied(String),

    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ControlError {
    pub fn window_not_found() -> Self {
        ControlError::NotFound("Window not found".to_string())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        ControlError::InvalidInput(msg.into())
    }

    /// Wrap a driver-level error with a short description of what was attempted.
    pub fn driver(action: &str, err: impl std::fmt::Debug) -> Self {
        ControlError::Driver(format!("Failed to {}: {:?}", action, err))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            // Lookup misses, wait timeouts and refused focus are ordinary answers
            ControlError::NotFound(_) | ControlError::Timeout(_) | ControlError::FocusDenied(_) => {
                StatusCode::OK
            }
            ControlError::InvalidInput(_) | ControlError::UnknownAction(_) => {
                StatusCode::BAD_REQUEST
            }
            ControlError::Unauthorized => StatusCode::UNAUTHORIZED,
            ControlError::Driver(_) | ControlError::Unsupported(_) | ControlError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

impl IntoResponse for ControlError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Unhandled error: {}", self);
        }

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ControlError>;

/// Best-effort text of a caught panic payload
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_caller_facing() {
        assert_eq!(ControlError::window_not_found().to_string(), "Window not found");
        assert_eq!(
            ControlError::UnknownAction("bogus".into()).to_string(),
            "Unknown action type: bogus"
        );
        assert_eq!(
            ControlError::Unsupported("Window placement").to_string(),
            "Window placement is not supported on this platform"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(ControlError::window_not_found().status_code(), StatusCode::OK);
        assert_eq!(ControlError::invalid("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ControlError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ControlError::FocusDenied("refused".into()).status_code(),
            StatusCode::OK
        );
        assert_eq!(
            ControlError::driver("click", "denied").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
