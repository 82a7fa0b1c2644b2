//! error taxonomy shared by the stub servers and the token helpers.
//!
//! request-scoped errors map onto an HTTP status and end only that request.
//! the file and signing errors are returned from initialization and end the
//! process from `main`.

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// the request body could not be buffered
    #[error("could not read request body: {0}")]
    UnreadableBody(#[from] BytesRejection),

    /// the body is not a JSON payload
    #[error("invalid JSON payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// wrong HTTP verb for the route
    #[error("{0}")]
    MethodNotAllowed(&'static str),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::UnreadableBody(_) | Self::Decode(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            // startup-only errors; no handler returns them
            Self::Io { .. } | Self::Config { .. } | Self::Signing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// the text the devices see; details stay in the log
    fn public_message(&self) -> &'static str {
        match self {
            Self::UnreadableBody(_) => "Could not read request",
            Self::Decode(_) => "Invalid JSON format",
            Self::MethodNotAllowed(message) => *message,
            Self::Io { .. } | Self::Config { .. } | Self::Signing(_) => "Internal Server Error",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(%status, error = %self, "request rejected");
        (status, format!("{}\n", self.public_message())).into_response()
    }
}
