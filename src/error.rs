//! Error types for the client state layer.
//!
//! Each seam gets its own enum so callers can match on what actually went
//! wrong. The binary and configuration loading use `anyhow` on top of these.

use std::time::Duration;
use thiserror::Error;

/// A context was looked up outside the subtree of its provider.
///
/// This is a programming error: the provider composition in a layout is
/// wrong. It is surfaced immediately rather than recovered from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("{consumer} must be used within a {provider}")]
    MissingProvider {
        consumer: &'static str,
        provider: &'static str,
    },
}

/// Durable client storage failed to read or write.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage file is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
}

/// A request to the backend REST API failed.
///
/// Messages are captured as strings so the error can be cloned into UI state
/// and shared between the caller and the cache.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    #[error("API error ({status}) from {endpoint}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Failed to parse response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

impl ApiError {
    /// Transport failures, 429 and 5xx responses are worth retrying.
    /// Other 4xx responses and malformed bodies are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport { .. } => true,
            ApiError::Status { status, .. } => *status == 429 || *status >= 500,
            ApiError::Decode { .. } => false,
        }
    }

    /// The backend rejected the session token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: 401 | 403, .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A query or mutation issued through the cache layer failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// An admin operation was attempted without a session token.
    #[error("Not authenticated")]
    Unauthenticated,
}

/// The live-update WebSocket connection failed.
#[derive(Debug, Error)]
pub enum WsError {
    #[error("WebSocket connection to {url} failed: {source}")]
    Connect {
        url: String,
        #[source]
        source: tokio_tungstenite::tungstenite::Error,
    },

    #[error("WebSocket connection to {url} timed out after {after:?}")]
    Timeout { url: String, after: Duration },

    #[error("WebSocket is not connected")]
    NotConnected,
}
