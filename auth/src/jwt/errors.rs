use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Invalid signing key: {0}")]
    InvalidKey(String),

    #[error("Invalid token expiry: {0}")]
    InvalidExpiry(String),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token audience does not match")]
    InvalidAudience,
}
