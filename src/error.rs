//! Domain-specific error types for pitchcraft

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::clients::CompletionError;
use crate::kind::GeneratorKind;

/// Main error type for the pitchcraft service and client
#[derive(Error, Debug)]
pub enum PitchcraftError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required fields for {kind}: {}", .fields.join(", "))]
    MissingFields {
        kind: GeneratorKind,
        fields: Vec<&'static str>,
    },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Completion service error ({kind}): {source}")]
    Upstream {
        kind: GeneratorKind,
        #[source]
        source: CompletionError,
    },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PitchcraftError {
    /// Whether the caller can fix this by resubmitting different input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PitchcraftError::MissingFields { .. } | PitchcraftError::InvalidRequest { .. }
        )
    }

    pub fn status(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// Text safe to hand back over the network
    pub fn public_message(&self) -> String {
        match self {
            PitchcraftError::MissingFields { kind, .. } => kind.missing_fields_message().to_string(),
            PitchcraftError::InvalidRequest { .. } => "Invalid request body".to_string(),
            PitchcraftError::Upstream { kind, .. } => kind.failure_message().to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

impl From<anyhow::Error> for PitchcraftError {
    fn from(err: anyhow::Error) -> Self {
        PitchcraftError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PitchcraftError {
    fn from(err: serde_json::Error) -> Self {
        PitchcraftError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for PitchcraftError {
    fn from(err: std::io::Error) -> Self {
        PitchcraftError::Storage {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PitchcraftError {
    fn from(err: toml::de::Error) -> Self {
        PitchcraftError::Config {
            message: err.to_string(),
        }
    }
}

/// Convert PitchcraftError to an HTTP response. Only the coarse category and a
/// fixed message cross the network boundary.
impl IntoResponse for PitchcraftError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.public_message() }))).into_response()
    }
}

/// Result type alias for pitchcraft operations
pub type Result<T> = std::result::Result<T, PitchcraftError>;
