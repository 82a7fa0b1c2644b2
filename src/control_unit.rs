//! ==============================================================================
//! control_unit.rs - control-unit stub server
//! ==============================================================================
//!
//! purpose:
//!     stands in for the backend a control unit reports to. it keeps the most
//!     recent payload in memory and shows it as a web page.
//!
//! routes:
//!     POST /post        replace the stored payload (json body)
//!     GET  /api/latest  stored payload as json
//!     *    /            html view of the stored payload (also every other path)
//!
//! relationships:
//!     - uses: store.rs (shared payload slot)
//!     - uses: render.rs (html view)
//!     - served by: server.rs
//!
//! ==============================================================================

use crate::domain::Payload;
use crate::error::{Error, Result};
use crate::render::render_dashboard;
use crate::store::PayloadStore;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    response::{Html, Json},
    routing::{any, get, post},
    Router,
};
use tracing::info;

pub const ACK: &str = "Readings received!\n";

/// build the router over a store handle; the caller keeps its own clone
pub fn router(store: PayloadStore) -> Router {
    Router::new()
        .route("/", any(dashboard_handler))
        .route(
            "/post",
            post(ingest_handler).fallback(|| async {
                Error::MethodNotAllowed("Only POST request supported")
            }),
        )
        .route("/api/latest", get(latest_handler))
        .fallback(dashboard_handler)
        .with_state(store)
}

async fn dashboard_handler(State(store): State<PayloadStore>) -> Html<String> {
    let payload = store.snapshot().await;
    Html(render_dashboard(&payload))
}

async fn ingest_handler(
    State(store): State<PayloadStore>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<&'static str> {
    let body = body?;
    store.ingest(&body).await?;
    info!(bytes = body.len(), "readings received");
    Ok(ACK)
}

/// json api endpoint for programmatic access
async fn latest_handler(State(store): State<PayloadStore>) -> Json<Payload> {
    Json(store.snapshot().await)
}
