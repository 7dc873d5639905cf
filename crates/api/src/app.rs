//! Router assembly.

use axum::{
    Extension, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::error::ApiError;
use crate::middleware::{RequestId, make_request_span, request_id_middleware};
use crate::routes;
use crate::state::AppState;

/// Build the application router with its middleware stack.
///
/// Requests still running after the configured timeout are answered with
/// 408 and their handler future (including any in-flight query) is dropped.
pub fn app(state: AppState) -> Router {
    let timeout = state.config().request_timeout;

    routes::routes()
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(middleware::map_response(timeout_body))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Give the timeout layer's empty 408 the usual `{"error": ...}` body.
async fn timeout_body(
    Extension(request_id): Extension<RequestId>,
    response: Response,
) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }
    tracing::warn!(%request_id, "Request timed out");
    ApiError::Timeout.into_response()
}
