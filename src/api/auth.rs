use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use super::state::AppState;
use crate::error::ControlError;

pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Deserialize)]
struct ApiKeyQuery {
    api_key: Option<String>,
}

/// Reject requests without the configured shared secret, taken from the
/// `X-API-Key` header or the `api_key` query parameter. A no-op when no key
/// is configured.
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.config.api_key.as_deref() else {
        return next.run(request).await;
    };

    let from_header = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let provided = from_header.or_else(|| {
        Query::<ApiKeyQuery>::try_from_uri(request.uri())
            .ok()
            .and_then(|Query(q)| q.api_key)
    });

    if provided.as_deref() == Some(expected) {
        next.run(request).await
    } else {
        tracing::warn!("Rejected unauthenticated request to {}", request.uri().path());
        ControlError::Unauthorized.into_response()
    }
}
