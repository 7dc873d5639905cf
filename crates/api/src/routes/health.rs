//! Health check endpoints.

use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies store connectivity before returning OK.
/// Returns 503 Service Unavailable if the store is not reachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(err) => {
            tracing::warn!(error = %err, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::app::app;
    use crate::config::tests::test_config;
    use crate::db::fake::FakeUserStore;

    async fn status_of(store: FakeUserStore, uri: &str) -> StatusCode {
        let app = app(AppState::new(test_config(), Arc::new(store)));
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_liveness_ignores_store() {
        assert_eq!(
            status_of(FakeUserStore::failing(), "/health").await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_readiness_reflects_store() {
        assert_eq!(
            status_of(FakeUserStore::default(), "/health/ready").await,
            StatusCode::OK
        );
        assert_eq!(
            status_of(FakeUserStore::failing(), "/health/ready").await,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
