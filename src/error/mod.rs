//! Error types for the bridge adapter.

use thiserror::Error;

/// Primary error type for bridge and configuration operations.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Connection failure, timeout, or non-2xx status on a catalog or health call.
    #[error("Bridge unavailable ({operation} {url}): {message}")]
    Unavailable {
        operation: &'static str,
        url: String,
        message: String,
        status: Option<u16>,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Non-2xx status on a tool call. The body is the bridge's own payload.
    #[error("Bridge error: {status} {body}")]
    CallFailed { status: u16, body: String },

    /// Any other failure talking to the bridge (network, malformed response).
    #[error("Transport error ({operation} {url}): {message}")]
    Transport {
        operation: &'static str,
        url: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Broad error kind for routing fallback logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BridgeUnavailable,
    BridgeCallFailed,
    Transport,
    Configuration,
}

impl BridgeError {
    /// Create an unavailable error from a failed request.
    pub fn unavailable(operation: &'static str, url: impl Into<String>, source: reqwest::Error) -> Self {
        let message = describe_reqwest_error(&source);
        Self::Unavailable {
            operation,
            url: url.into(),
            message,
            status: source.status().map(|s| s.as_u16()),
            source: Some(source),
        }
    }

    /// Create an unavailable error for a non-2xx response.
    pub fn unavailable_status(operation: &'static str, url: impl Into<String>, status: u16) -> Self {
        Self::Unavailable {
            operation,
            url: url.into(),
            message: format!("HTTP status {status}"),
            status: Some(status),
            source: None,
        }
    }

    /// Create a transport error with an underlying cause.
    pub fn transport(
        operation: &'static str,
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            operation,
            url: url.into(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a transport error for a response that does not have the expected shape.
    pub fn malformed(operation: &'static str, url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            operation,
            url: url.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unavailable { .. } => ErrorKind::BridgeUnavailable,
            Self::CallFailed { .. } => ErrorKind::BridgeCallFailed,
            Self::Transport { .. } | Self::Serialization(_) => ErrorKind::Transport,
            Self::Configuration(_) => ErrorKind::Configuration,
        }
    }

    /// HTTP status reported by the bridge, when the failure carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::CallFailed { status, .. } => Some(*status),
            Self::Unavailable { status, .. } => *status,
            _ => None,
        }
    }
}

fn describe_reqwest_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("request timed out: {error}")
    } else if error.is_connect() {
        format!("connection failed: {error}")
    } else {
        error.to_string()
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, BridgeError>;
