//! Typed error handling for labdesk
//!
//! The list engine itself never fails. Errors come from the layers around
//! it: looking up records, validating payloads, access checks, remote list
//! fetches and configuration.
//!
//! # Error Categories
//!
//! - [`RecordError`]: record lookup and collection routing
//! - [`AccessError`]: missing identity or insufficient rights
//! - [`RemoteError`]: failures of a remote list fetch
//! - `Validation`, `Config`, `Internal`
//!
//! # Example
//!
//! ```rust,ignore
//! match client.fetch_page::<Paper>(&ctx, &request).await {
//!     Ok(page) => render(page),
//!     Err(LabdeskError::Remote(RemoteError::Status { status, .. })) => {
//!         tracing::warn!("list endpoint answered {}", status);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

/// The main error type for labdesk
#[derive(Debug, thiserror::Error)]
pub enum LabdeskError {
    /// Record lookup errors
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Access control errors
    #[error(transparent)]
    Access(#[from] AccessError),

    /// Remote list fetch errors
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Payload validation failed
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        fields: Option<serde_json::Value>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors related to records and collections
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("{collection} record '{id}' not found")]
    NotFound { collection: String, id: Uuid },

    #[error("'{id}' is not a valid record id")]
    InvalidId { id: String },

    #[error("Unknown collection: {collection}")]
    UnknownCollection { collection: String },
}

/// Errors related to access control
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },
}

/// Errors raised while fetching a remote list page
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} answered {status}")]
    Status { url: String, status: u16 },

    #[error("Could not decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("No bearer token available: {message}")]
    Token { message: String },
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LabdeskError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            LabdeskError::Record(RecordError::NotFound { .. }) => StatusCode::NOT_FOUND,
            LabdeskError::Record(RecordError::InvalidId { .. }) => StatusCode::BAD_REQUEST,
            LabdeskError::Record(RecordError::UnknownCollection { .. }) => StatusCode::NOT_FOUND,
            LabdeskError::Access(AccessError::Unauthorized { .. }) => StatusCode::UNAUTHORIZED,
            LabdeskError::Access(AccessError::Forbidden { .. }) => StatusCode::FORBIDDEN,
            LabdeskError::Remote(_) => StatusCode::BAD_GATEWAY,
            LabdeskError::Validation { .. } => StatusCode::BAD_REQUEST,
            LabdeskError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LabdeskError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            LabdeskError::Record(RecordError::NotFound { .. }) => "RECORD_NOT_FOUND",
            LabdeskError::Record(RecordError::InvalidId { .. }) => "INVALID_RECORD_ID",
            LabdeskError::Record(RecordError::UnknownCollection { .. }) => "UNKNOWN_COLLECTION",
            LabdeskError::Access(AccessError::Unauthorized { .. }) => "UNAUTHORIZED",
            LabdeskError::Access(AccessError::Forbidden { .. }) => "FORBIDDEN",
            LabdeskError::Remote(RemoteError::Transport { .. }) => "REMOTE_TRANSPORT_ERROR",
            LabdeskError::Remote(RemoteError::Status { .. }) => "REMOTE_STATUS_ERROR",
            LabdeskError::Remote(RemoteError::Decode { .. }) => "REMOTE_DECODE_ERROR",
            LabdeskError::Remote(RemoteError::Token { .. }) => "REMOTE_TOKEN_ERROR",
            LabdeskError::Validation { .. } => "VALIDATION_ERROR",
            LabdeskError::Config(_) => "CONFIG_ERROR",
            LabdeskError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            LabdeskError::Record(RecordError::NotFound { collection, id }) => {
                Some(serde_json::json!({
                    "collection": collection,
                    "id": id.to_string()
                }))
            }
            LabdeskError::Record(RecordError::UnknownCollection { collection }) => {
                Some(serde_json::json!({ "collection": collection }))
            }
            LabdeskError::Validation {
                fields: Some(fields),
                ..
            } => Some(serde_json::json!({ "fields": fields })),
            _ => None,
        }
    }

    /// Build a validation error from `validator` output
    pub fn from_validation(errors: validator::ValidationErrors) -> Self {
        let fields = serde_json::to_value(errors.field_errors()).ok();
        LabdeskError::Validation {
            message: errors.to_string(),
            fields,
        }
    }
}

impl IntoResponse for LabdeskError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<anyhow::Error> for LabdeskError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<LabdeskError>() {
            Ok(typed) => typed,
            Err(other) => LabdeskError::Internal(other.to_string()),
        }
    }
}

/// Result alias used by handlers
pub type LabdeskResult<T> = std::result::Result<T, LabdeskError>;
