//! Integration tests for the request-completion middleware.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use tower::ServiceExt;

use logmux::level::Severity;
use logmux::middleware::log_requests;
use logmux::record::LogRecord;
use logmux::{LogDispatcher, Sink};

/// Sink capturing emissions for assertions.
#[derive(Clone, Default)]
struct CaptureSink {
    lines: Arc<Mutex<Vec<(Severity, String)>>>,
}

impl CaptureSink {
    fn lines(&self) -> Vec<(Severity, String)> {
        self.lines.lock().unwrap().clone()
    }
}

impl Sink for CaptureSink {
    fn write(&self, severity: Severity, record: &LogRecord) -> bool {
        self.lines
            .lock()
            .unwrap()
            .push((severity, record.payload.to_text().into_owned()));
        true
    }
}

fn test_app() -> (Router, Arc<LogDispatcher>, CaptureSink) {
    let sink = CaptureSink::default();
    let dispatcher = Arc::new(LogDispatcher::with_sink("mw-test", Box::new(sink.clone())));

    let app = Router::new()
        .route("/widgets", get(|| async { "[]" }))
        .route("/health", get(|| async { "healthy" }))
        .route("/missing-backend", get(|| async { StatusCode::BAD_GATEWAY }))
        .layer(from_fn_with_state(dispatcher.clone(), log_requests));

    (app, dispatcher, sink)
}

#[tokio::test]
async fn test_completed_request_emits_one_debug_line() {
    let (app, _dispatcher, sink) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/widgets")
                .header("host", "example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let lines = sink.lines();
    assert_eq!(lines.len(), 1, "expected exactly one emission: {lines:?}");

    let (severity, line) = &lines[0];
    assert_eq!(*severity, Severity::Debug);
    assert!(line.starts_with("GET http://example.com/widgets 200 "));
    assert!(line.ends_with(" ms"));

    // duration is a non-negative integer between status and "ms"
    let duration: u128 = line
        .split_whitespace()
        .rev()
        .nth(1)
        .unwrap()
        .parse()
        .expect("duration parses");
    let _ = duration;
}

#[tokio::test]
async fn test_ignored_path_emits_nothing() {
    let (app, _dispatcher, sink) = test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(sink.lines().is_empty());
}

#[tokio::test]
async fn test_added_ignored_path_suppresses_logging() {
    let (app, dispatcher, sink) = test_app();
    dispatcher.add_ignored_path("/widgets");

    app.oneshot(Request::builder().uri("/widgets").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(sink.lines().is_empty());
}

#[tokio::test]
async fn test_status_code_is_reported_not_intercepted() {
    let (app, _dispatcher, sink) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/missing-backend")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].1.contains(" 502 "));
}

#[tokio::test]
async fn test_threshold_above_debug_silences_request_lines() {
    let (app, dispatcher, sink) = test_app();
    dispatcher.set_level("info").unwrap();

    app.oneshot(Request::builder().uri("/widgets").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(sink.lines().is_empty());
}
