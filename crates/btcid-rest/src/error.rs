//! Error types for REST API operations

use btcid_auth::AuthError;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Request could not be built, sent, or its body read
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The exchange reported a failure
    #[error("Exchange error: {message}")]
    Exchange {
        /// Error code from the exchange, when one was sent
        code: Option<String>,
        /// Error message from the exchange
        message: String,
    },

    /// Missing API credentials for private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Credential loading or request signing failed
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl RestError {
    /// Check if this error was reported by the exchange itself
    pub fn is_exchange(&self) -> bool {
        matches!(self, Self::Exchange { .. })
    }

    /// Check if this error is a transport failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if this error is a malformed response body
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    /// Error code sent by the exchange, if any
    pub fn exchange_code(&self) -> Option<&str> {
        match self {
            Self::Exchange { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
