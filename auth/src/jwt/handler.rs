use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// JWT token handler bound to a single signing secret.
///
/// Generic over the claims type to allow services to define their own token payload.
/// Uses HS256 (HMAC with SHA-256). In the SSO model each application owns a secret,
/// so a handler is built per application and a token signed by one handler never
/// verifies under another.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Errors
    /// * `InvalidKey` - Secret is empty
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidKey("secret must not be empty".to_string()));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        })
    }

    /// Encode claims into a signed JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token issued for `audience`.
    ///
    /// Signature, `exp` and `aud` are checked; `sub`, `aud` and `exp` must be present.
    /// No leeway is applied to expiration.
    ///
    /// # Errors
    /// * `TokenExpired` - Token has expired
    /// * `InvalidAudience` - Token was issued for a different audience
    /// * `DecodingFailed` - Signature is invalid or the token is malformed
    pub fn decode<T: for<'de> Deserialize<'de>>(
        &self,
        token: &str,
        audience: &str,
    ) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "aud", "sub"]);

        let token_data =
            decode::<T>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::InvalidAudience => JwtError::InvalidAudience,
                _ => JwtError::DecodingFailed(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;

    use super::*;
    use crate::jwt::SessionClaims;

    fn claims_for(audience: i32) -> SessionClaims {
        SessionClaims::new(42, "user@example.com", audience, Utc::now(), Duration::hours(1))
            .expect("Failed to build claims")
    }

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!").unwrap();
        let claims = claims_for(7);

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());

        let decoded: SessionClaims = handler.decode(&token, "7").expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_new_rejects_empty_secret() {
        let result = JwtHandler::new(b"");
        assert!(matches!(result, Err(JwtError::InvalidKey(_))));
    }

    #[test]
    fn test_decode_invalid_token() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!").unwrap();

        let result = handler.decode::<SessionClaims>("invalid.token.here", "7");
        assert!(matches!(result, Err(JwtError::DecodingFailed(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!").unwrap();
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!").unwrap();

        let token = handler1.encode(&claims_for(7)).expect("Failed to encode token");

        let result = handler2.decode::<SessionClaims>(&token, "7");
        assert!(matches!(result, Err(JwtError::DecodingFailed(_))));
    }

    #[test]
    fn test_decode_with_wrong_audience() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!").unwrap();

        let token = handler.encode(&claims_for(7)).expect("Failed to encode token");

        let result = handler.decode::<SessionClaims>(&token, "8");
        assert_eq!(result, Err(JwtError::InvalidAudience));
    }

    #[test]
    fn test_decode_expired_token() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!").unwrap();
        let issued_at = Utc::now() - Duration::hours(2);
        let claims = SessionClaims::new(42, "user@example.com", 7, issued_at, Duration::hours(1))
            .expect("Failed to build claims");

        let token = handler.encode(&claims).expect("Failed to encode token");

        let result = handler.decode::<SessionClaims>(&token, "7");
        assert_eq!(result, Err(JwtError::TokenExpired));
    }
}
