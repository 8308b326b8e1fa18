use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::jwt::errors::JwtError;

/// Claims carried by an SSO session token.
///
/// Binds a user to exactly one application: `aud` holds the application
/// identifier and the token is signed with that application's secret.
/// Timestamps are Unix seconds as required by RFC 7519.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject (user identifier)
    pub sub: String,

    /// Email of the authenticated user
    pub email: String,

    /// Audience (application identifier)
    pub aud: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims for a session issued at `issued_at` and valid for `ttl`.
    ///
    /// # Arguments
    /// * `subject` - User identifier
    /// * `email` - User email
    /// * `audience` - Application identifier the token is scoped to
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Token lifetime
    ///
    /// # Errors
    /// * `InvalidExpiry` - `ttl` is not positive or `issued_at + ttl` is not representable
    pub fn new(
        subject: impl ToString,
        email: impl Into<String>,
        audience: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        if ttl <= Duration::zero() {
            return Err(JwtError::InvalidExpiry(format!("non-positive lifetime {}", ttl)));
        }

        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| JwtError::InvalidExpiry(format!("{} + {} overflows", issued_at, ttl)))?;

        Ok(Self {
            sub: subject.to_string(),
            email: email.into(),
            aud: audience.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }
}
