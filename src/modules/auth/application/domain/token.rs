use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use super::entities::{AuthSession, UserId};

/// Claims the backend puts into issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user_id: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenDecodeError {
    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token expiry out of range: {0}")]
    InvalidExpiry(i64),
}

/// Read the claims of a backend token.
///
/// The signing secret lives on the server, so the signature is not checked
/// here; the token is only inspected for identity and expiry.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenDecodeError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| TokenDecodeError::Malformed(e.to_string()))
}

impl AuthSession {
    pub fn from_token(token: &str, full_name: Option<String>) -> Result<Self, TokenDecodeError> {
        let claims = decode_claims(token)?;
        let expires_at: DateTime<Utc> = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or(TokenDecodeError::InvalidExpiry(claims.exp))?;

        Ok(Self {
            token: token.to_string(),
            user_id: UserId::from(claims.user_id),
            expires_at,
            full_name,
        })
    }
}
