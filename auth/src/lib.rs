//! Cryptographic primitives for the SSO service
//!
//! - Password hashing (Argon2id with compiled-in cost parameters)
//! - Session claims and HS256 JWT signing/validation
//!
//! The service crate owns the authentication workflow and adapts these primitives.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{JwtHandler, SessionClaims};
//! use chrono::{Duration, Utc};
//!
//! let handler = JwtHandler::new(b"application_secret").unwrap();
//! let claims = SessionClaims::new(1, "alice@example.com", 7, Utc::now(), Duration::hours(1)).unwrap();
//! let token = handler.encode(&claims).unwrap();
//! let decoded: SessionClaims = handler.decode(&token, "7").unwrap();
//! assert_eq!(decoded.sub, "1");
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SessionClaims;
pub use password::PasswordError;
pub use password::PasswordHasher;
