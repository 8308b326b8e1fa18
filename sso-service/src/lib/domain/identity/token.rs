use auth::JwtError;
use auth::JwtHandler;
use auth::SessionClaims;
use chrono::Duration;
use chrono::Utc;

use crate::domain::identity::models::App;
use crate::domain::identity::models::User;

/// Mint a session token for `user`, scoped to `app` and valid for `ttl`.
///
/// The token is signed with the application's secret and carries the application
/// id as audience. Issued-at is taken from the clock at call time.
///
/// # Errors
/// * `InvalidKey` - Application secret is unusable as signing key
/// * `InvalidExpiry` - `ttl` is not positive or overflows the expiry timestamp
/// * `EncodingFailed` - Signing failed
pub fn mint_token(user: &User, app: &App, ttl: Duration) -> Result<String, JwtError> {
    let handler = JwtHandler::new(app.secret.as_bytes())?;
    let claims = SessionClaims::new(user.id, user.email.as_str(), app.id, Utc::now(), ttl)?;

    handler.encode(&claims)
}

/// Validate a session token against the application it claims to be issued for.
///
/// # Errors
/// * `TokenExpired` - Token is past its expiration
/// * `InvalidAudience` - Token was issued for another application
/// * `DecodingFailed` - Signature does not match `app`'s secret or token is malformed
pub fn verify_token(token: &str, app: &App) -> Result<SessionClaims, JwtError> {
    JwtHandler::new(app.secret.as_bytes())?.decode(token, &app.id.to_string())
}
