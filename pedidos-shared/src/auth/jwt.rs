/// JWT token generation and validation
///
/// Bearer tokens are signed with HS256 (HMAC-SHA256) and carry the user id
/// as subject. Tokens expire after 24 hours; there is no refresh flow, a
/// client simply logs in again.
///
/// # Example
///
/// ```
/// use pedidos_shared::auth::jwt::{create_token, validate_token, Claims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let claims = Claims::new(42);
/// let token = create_token(&claims, "test-secret-key-at-least-32-bytes!!")?;
///
/// let validated = validate_token(&token, "test-secret-key-at-least-32-bytes!!")?;
/// assert_eq!(validated.sub, 42);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Issuer claim stamped into every token
const ISSUER: &str = "pedidos-api";

/// Default token lifetime
const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,
}

/// JWT claims structure
///
/// Standard claims only; the subject is the numeric user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user id
    pub sub: i64,

    /// Issuer - always "pedidos-api"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates new claims with the default 24-hour expiration
    pub fn new(user_id: i64) -> Self {
        Self::with_expiration(user_id, Duration::hours(TOKEN_LIFETIME_HOURS))
    }

    /// Creates claims with a custom expiration
    pub fn with_expiration(user_id: i64, expires_in: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
        }
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Creates a signed JWT token from claims
///
/// # Errors
///
/// Returns `JwtError::CreateError` if signing fails.
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::CreateError(e.to_string()))
}

/// Validates a JWT token and returns its claims
///
/// Checks the signature, expiration, and issuer.
///
/// # Errors
///
/// - `JwtError::Expired` if the token is past its expiration
/// - `JwtError::ValidationError` for any other validation failure
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::ValidationError(e.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes!!";

    #[test]
    fn test_token_roundtrip() {
        let claims = Claims::new(7);
        let token = create_token(&claims, SECRET).unwrap();

        let validated = validate_token(&token, SECRET).unwrap();
        assert_eq!(validated.sub, 7);
        assert_eq!(validated.iss, ISSUER);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let claims = Claims::new(7);
        let token = create_token(&claims, SECRET).unwrap();

        let result = validate_token(&token, "another-secret-also-32-bytes-long!!");
        assert!(matches!(result, Err(JwtError::ValidationError(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        // Past the decoder's default 60-second leeway
        let claims = Claims::with_expiration(7, Duration::seconds(-300));
        let token = create_token(&claims, SECRET).unwrap();

        let result = validate_token(&token, SECRET);
        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_is_expired() {
        let live = Claims::new(1);
        assert!(!live.is_expired());

        let dead = Claims::with_expiration(1, Duration::seconds(-1));
        assert!(dead.is_expired());
    }
}
