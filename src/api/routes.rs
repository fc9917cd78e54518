use axum::{
    http::{header, HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::any::Any;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use super::auth::require_api_key;
use super::handlers::{clipboard, combo, health, keyboard, mouse, screen, windows};
use super::state::AppState;
use crate::error::{panic_message, ErrorResponse};

pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        // System
        .route("/health", get(health::health_check))
        .route("/screen/size", get(screen::size))
        // Mouse
        .route("/mouse/position", get(mouse::position))
        .route("/mouse/move", post(mouse::move_to))
        .route("/mouse/move_relative", post(mouse::move_relative))
        .route("/mouse/click", post(mouse::click))
        .route("/mouse/double_click", post(mouse::double_click))
        .route("/mouse/right_click", post(mouse::right_click))
        .route("/mouse/drag", post(mouse::drag))
        .route("/mouse/scroll", post(mouse::scroll))
        // Keyboard
        .route("/keyboard/type", post(keyboard::type_text))
        .route("/keyboard/press", post(keyboard::press))
        .route("/keyboard/hotkey", post(keyboard::hotkey))
        .route("/keyboard/key_down", post(keyboard::key_down))
        .route("/keyboard/key_up", post(keyboard::key_up))
        .route("/keyboard/write_instant", post(keyboard::write_instant))
        // Screenshots
        .route("/screenshot", get(screen::screenshot))
        .route("/screenshot/region", post(screen::region))
        .route("/screenshot/file", post(screen::to_file))
        .route("/pixel", get(screen::pixel))
        // Windows
        .route("/windows/list", get(windows::list))
        .route("/windows/active", get(windows::active))
        .route("/windows/focus", post(windows::focus))
        .route("/windows/minimize", post(windows::minimize))
        .route("/windows/maximize", post(windows::maximize))
        .route("/windows/restore", post(windows::restore))
        .route("/windows/close", post(windows::close))
        .route("/windows/move", post(windows::move_window))
        .route("/windows/resize", post(windows::resize))
        .route("/windows/find", get(windows::find))
        .route("/windows/wait", post(windows::wait))
        // Clipboard
        .route("/clipboard", get(clipboard::get_text).post(clipboard::set_text))
        .route("/clipboard/clear", post(clipboard::clear))
        .route("/clipboard/image", get(clipboard::get_image))
        // Combo
        .route("/combo/click_and_type", post(combo::click_and_type))
        .route("/combo/batch", post(combo::batch));

    Router::new()
        .nest("/api", api)
        .fallback(endpoint_not_found)
        .layer(middleware::map_response(method_not_allowed_json))
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn endpoint_not_found() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Endpoint not found")))
}

/// Method mismatches come out of the router with an empty body; give them
/// the JSON error shape. The `Allow` header is kept.
async fn method_not_allowed_json(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    let body = Json(ErrorResponse::new("Method not allowed"))
        .into_response()
        .into_body();
    Response::from_parts(parts, body)
}

fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic_message(payload.as_ref());
    tracing::error!("Handler panicked: {}", message);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(format!("Internal error: {}", message))),
    )
        .into_response()
}
