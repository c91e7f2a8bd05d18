//! Error types for authentication operations

/// Errors that can occur while loading credentials or building signed requests
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Form body could not be encoded
    #[error("Form encoding error: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    /// A caller-supplied parameter clashes with a reserved form field
    #[error("Reserved parameter: {0}")]
    ReservedParameter(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
