//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use tokio::net::TcpListener;

/// A fake cloud ingestion backend recording every entry POSTed to it.
#[derive(Clone)]
pub struct CaptureBackend {
    pub entries: Arc<Mutex<Vec<serde_json::Value>>>,
    pub addr: SocketAddr,
}

impl CaptureBackend {
    /// Ingestion URL for the transport under test.
    pub fn endpoint(&self) -> String {
        format!("http://{}/v1/entries", self.addr)
    }

    pub fn recorded(&self) -> Vec<serde_json::Value> {
        self.entries.lock().unwrap().clone()
    }
}

/// Start the capture backend on an ephemeral port.
pub async fn start_capture_backend() -> CaptureBackend {
    let entries: Arc<Mutex<Vec<serde_json::Value>>> = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route("/v1/entries", post(record_entry))
        .with_state(entries.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    CaptureBackend { entries, addr }
}

async fn record_entry(
    State(entries): State<Arc<Mutex<Vec<serde_json::Value>>>>,
    Json(entry): Json<serde_json::Value>,
) -> StatusCode {
    entries.lock().unwrap().push(entry);
    StatusCode::OK
}
