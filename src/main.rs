//! Demo service showing the logger wired into an Axum app.
//!
//! `DEPLOY_STAGE` absent or `dev` logs to the console; any other stage
//! routes structured entries to the endpoint named by `LOG_ENDPOINT`.

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use tokio::net::TcpListener;

use logmux::middleware::log_requests;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logger = logmux::init("logmux-demo")?;

    logger.info(&format!(
        "logmux-demo starting, level={} mode={}",
        logger.level_name(),
        if logmux::DeployStage::from_env().is_cloud() {
            "cloud"
        } else {
            "local"
        }
    ));

    let app = Router::new()
        .route("/", get(|| async { "ok" }))
        .route("/health", get(|| async { "healthy" }))
        .route("/widgets", get(|| async { "[]" }))
        .layer(from_fn_with_state(Arc::clone(&logger), log_requests));

    let listener = TcpListener::bind("127.0.0.1:8080").await?;
    logger.info(&format!("listening on {}", listener.local_addr()?));

    axum::serve(listener, app).await?;
    Ok(())
}
