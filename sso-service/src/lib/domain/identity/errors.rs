use thiserror::Error;

/// Failures reported by the user store and the application registry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("User already exists")]
    UserExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Application not found")]
    AppNotFound,

    /// The store aborted the call before it completed (pool closed, acquire deadline).
    #[error("Store operation canceled")]
    Canceled,

    #[error("Database error: {0}")]
    Database(String),
}

/// Errors surfaced to callers of the authentication service.
///
/// Port failures are classified into these kinds before they leave the service.
/// `Internal` keeps the underlying cause as its `source()` for logging; its
/// display text never includes it.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email, wrong password, or unresolvable application.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Not found")]
    NotFound,

    #[error("Operation canceled")]
    Canceled,

    #[error("Internal error")]
    Internal(#[source] anyhow::Error),
}

impl AuthError {
    pub(crate) fn internal(cause: impl Into<anyhow::Error>, context: &'static str) -> Self {
        AuthError::Internal(cause.into().context(context))
    }
}
