use crate::error::AppError;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tokens are valid for 24 hours from issuance.
pub const TOKEN_TTL_SECS: u64 = 60 * 60 * 24;

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Subject of the token: the user's email (the login identifier).
    pub sub: String,
    /// Issuance timestamp (seconds since epoch).
    pub iat: u64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: u64,
}

/// Why a presented token was rejected.
///
/// The kinds stay distinguishable here for logging; they all collapse to a
/// single unauthenticated outcome before anything reaches the client, so a
/// caller can never tell an expired token from a tampered one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The token is not a structurally valid compact JWT.
    #[error("token is malformed")]
    Malformed,
    /// The signature does not verify under the current key.
    #[error("token signature is invalid")]
    InvalidSignature,
    /// The token's expiry instant has been reached.
    #[error("token has expired")]
    Expired,
    /// The signing key is not configured; validation fails closed.
    #[error("signing key unavailable")]
    KeyUnavailable,
}

fn signing_secret() -> Option<String> {
    std::env::var("JWT_SECRET").ok()
}

/// Issues a signed token for the given subject (user email).
///
/// Sets `iat` to now and `exp` to now + 24 hours, signed with HS256 over the
/// process-wide `JWT_SECRET`.
pub fn issue_token(subject: &str) -> Result<String, AppError> {
    let now = chrono::Utc::now().timestamp() as u64;
    let claims = Claims {
        sub: subject.to_owned(),
        iat: now,
        exp: now + TOKEN_TTL_SECS,
    };

    let secret = signing_secret()
        .ok_or_else(|| AppError::InternalServerError("JWT_SECRET not set".into()))?;

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
}

/// Validates a presented token and returns its claims.
///
/// Fails closed on every anomaly: structural problems and signature problems
/// both yield a typed error and never a panic, since this runs against
/// attacker-controlled input on every request.
///
/// Expiry is checked here rather than by the JWT library so that the
/// comparison uses a single timestamp captured once per call and is strict:
/// a token at exactly its expiry instant is already expired (the library's
/// default also allows 60 seconds of leeway, which this contract does not).
pub fn validate_token(token: &str) -> Result<Claims, TokenError> {
    let secret = signing_secret().ok_or(TokenError::KeyUnavailable)?;

    let mut validation = Validation::default();
    validation.validate_exp = false;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })?;

    let now = chrono::Utc::now().timestamp() as u64;
    if data.claims.exp <= now {
        return Err(TokenError::Expired);
    }

    Ok(data.claims)
}
