//! sensor-unit stub server: answers the handshake a sensor unit performs
//! against its control unit, and hands out the current time.
//!
//! ```text
//!     POST /connect  {"status":"connected","sensor_id":"<id>"}
//!     GET  /time     {"timestamp":<unix seconds>}
//! ```

use crate::error::Error;

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

const METHOD_NOT_ALLOWED: &str = "Method Not Allowed";

#[derive(Debug, Serialize)]
pub struct ConnectResponse {
    pub status: &'static str,
    pub sensor_id: String,
}

#[derive(Debug, Serialize)]
pub struct TimeResponse {
    pub timestamp: i64,
}

pub fn router(sensor_id: impl Into<String>) -> Router {
    let sensor_id: Arc<str> = Arc::from(sensor_id.into());
    Router::new()
        .route(
            "/connect",
            post(connect_handler).fallback(|| async { Error::MethodNotAllowed(METHOD_NOT_ALLOWED) }),
        )
        .route(
            "/time",
            get(time_handler).fallback(|| async { Error::MethodNotAllowed(METHOD_NOT_ALLOWED) }),
        )
        .with_state(sensor_id)
}

async fn connect_handler(State(sensor_id): State<Arc<str>>) -> Json<ConnectResponse> {
    info!(%sensor_id, "sensor unit connected");
    Json(ConnectResponse {
        status: "connected",
        sensor_id: sensor_id.to_string(),
    })
}

async fn time_handler() -> Json<TimeResponse> {
    Json(TimeResponse {
        timestamp: chrono::Utc::now().timestamp(),
    })
}
