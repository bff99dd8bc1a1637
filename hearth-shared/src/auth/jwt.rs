/// Session token generation and validation
///
/// This module provides the signed session tokens handed out after a magic
/// link is verified. Tokens are JWTs signed with HS256 (HMAC-SHA256) and
/// carry the user id as the subject claim.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Expiration**: 30 days from issuance
/// - **Validation**: Signature, expiration, nbf, and issuer checks
/// - **Secret Management**: Secrets must be at least 32 bytes (256 bits)
///
/// # Example
///
/// ```
/// use hearth_shared::auth::jwt::{create_session_token, validate_session_token};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
/// let secret = "your-secret-key-at-least-32-bytes-long";
///
/// let token = create_session_token(user_id, secret)?;
/// let claims = validate_session_token(&token, secret)?;
/// assert_eq!(claims.sub, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token issuer written into every session token
const ISSUER: &str = "hearth";

/// Session token lifetime
const SESSION_LIFETIME_DAYS: i64 = 30;

/// Error type for session token operations
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

    /// Invalid issuer
    #[error("Invalid issuer")]
    InvalidIssuer,
}

/// Session token claims
///
/// Standard JWT claims; the subject is the authenticated user's id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject - User ID
    pub sub: Uuid,

    /// Issuer - Always "hearth"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,
}

impl SessionClaims {
    /// Creates claims for a user with the default 30-day expiration
    pub fn new(user_id: Uuid) -> Self {
        Self::with_lifetime(user_id, Duration::days(SESSION_LIFETIME_DAYS))
    }

    /// Creates claims with a custom lifetime
    pub fn with_lifetime(user_id: Uuid, lifetime: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + lifetime;

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Creates a signed session token for a user
///
/// # Errors
///
/// Returns `JwtError::CreateError` if token encoding fails
pub fn create_session_token(user_id: Uuid, secret: &str) -> Result<String, JwtError> {
    let claims = SessionClaims::new(user_id);
    sign_claims(&claims, secret)
}

/// Signs an already-built claims value
///
/// Split out from [`create_session_token`] so tests can sign claims with
/// custom lifetimes.
pub fn sign_claims(claims: &SessionClaims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a session token and extracts its claims
///
/// Verifies the signature, expiration, nbf, and issuer. Any malformed input
/// yields an error value; decoding faults never propagate past this
/// function.
///
/// # Errors
///
/// Returns an error if the signature is invalid, the token has expired, the
/// issuer does not match, or the token format is invalid.
pub fn validate_session_token(token: &str, secret: &str) -> Result<SessionClaims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;

    let token_data = decode::<SessionClaims>(token, &key, &validation).map_err(|e| {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
            jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
            _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
        }
    })?;

    Ok(token_data.claims)
}
