//! Request-completion logging middleware.
//!
//! # Responsibilities
//! - Record a start instant when a request arrives
//! - On completion, emit one debug line per request:
//!   `<METHOD> <SCHEME>://<HOST><PATH> <STATUS_CODE> <DURATION> ms`
//! - Suppress logging for paths on the dispatcher's ignore list (exact match)
//!
//! # Design Decisions
//! - A fire-and-forget observer: never touches the response body or status,
//!   never blocks completion
//! - Wired as `axum::middleware::from_fn_with_state` so the dispatcher is
//!   threaded explicitly instead of living in ambient state

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::dispatcher::LogDispatcher;

/// Log one debug line when the response completes.
///
/// Attach with
/// `axum::middleware::from_fn_with_state(dispatcher, log_requests)`.
pub async fn log_requests(
    State(dispatcher): State<Arc<LogDispatcher>>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let scheme = request
        .uri()
        .scheme_str()
        .unwrap_or("http")
        .to_string();
    let host = request
        .uri()
        .authority()
        .map(|a| a.to_string())
        .or_else(|| {
            request
                .headers()
                .get(header::HOST)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        })
        .unwrap_or_default();

    let response = next.run(request).await;

    if !dispatcher.is_ignored(&path) {
        let elapsed_ms = start.elapsed().as_millis();
        dispatcher.debug(&format!(
            "{} {}://{}{} {} {} ms",
            method,
            scheme,
            host,
            path,
            response.status().as_u16(),
            elapsed_ms
        ));
    }

    response
}
