// Error types for the comment service
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    /// The downstream service could not be reached.
    #[error("Transport error calling {uri}: {reason}")]
    Transport { uri: String, reason: String },

    /// The downstream service answered with something other than 200.
    #[error("Unexpected status {status} from {uri}")]
    Status { uri: String, status: u16 },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) | AppError::ConfigParsing(_) => "configuration_error",
            AppError::Transport { .. } => "transport_error",
            AppError::Status { .. } => "status_error",
            AppError::Decode(_) => "decode_error",
            AppError::InvalidRequest(_) => "invalid_request_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Payload attached to the audit event that records a failed adapter call.
    pub fn log_payload(&self) -> Value {
        json!({
            "error": self.kind(),
            "message": self.to_string(),
        })
    }
}

// Adapter failures are folded into a "Failed" status by the handlers and never
// get here; this covers requests rejected before any downstream call.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Transport { .. } | AppError::Status { .. } | AppError::Decode(_) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = json!({
            "type": "error",
            "error": {
                "type": self.kind(),
                "message": self.to_string(),
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
