//! Request ID middleware for request correlation.
//!
//! Every request gets a freshly generated UUID v4, even if the client sent an
//! `x-request-id` header, so no two requests share a token. The request ID is:
//! - Stored in the request extensions as a [`RequestId`]
//! - Added to the Sentry scope for error correlation
//! - Returned in the response headers

use std::fmt;

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Per-request correlation token.
///
/// Handlers receive it with `Extension<RequestId>` and pass it to every log
/// call they make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Middleware that tags every request with a unique request ID.
///
/// Must wrap the trace layer so [`make_request_span`] can see the ID.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::generate();
    request.extensions_mut().insert(request_id);

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Span factory for `TraceLayer` that records the request ID.
pub fn make_request_span(request: &Request) -> Span {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(ToString::to_string)
        .unwrap_or_default();

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::{Extension, Router, body::Body, middleware, routing::get};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn echo(Extension(request_id): Extension<RequestId>) -> String {
        request_id.to_string()
    }

    fn router() -> Router {
        Router::new()
            .route("/echo", get(echo))
            .layer(middleware::from_fn(request_id_middleware))
    }

    async fn call(request: Request) -> (String, String) {
        let response = router().oneshot(request).await.unwrap();
        let header = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_owned();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (header, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn echo_request() -> Request {
        axum::http::Request::builder()
            .uri("/echo")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_header_matches_handler_extension() {
        let (header, body) = call(echo_request()).await;
        assert!(!header.is_empty());
        assert_eq!(header, body);
        assert!(Uuid::parse_str(&header).is_ok());
    }

    #[tokio::test]
    async fn test_each_request_gets_a_fresh_id() {
        let (first, _) = call(echo_request()).await;
        let (second, _) = call(echo_request()).await;
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_client_supplied_id_is_replaced() {
        let request = axum::http::Request::builder()
            .uri("/echo")
            .header(REQUEST_ID_HEADER, "client-chosen")
            .body(Body::empty())
            .unwrap();
        let (header, body) = call(request).await;
        assert_ne!(header, "client-chosen");
        assert_eq!(header, body);
    }
}
