//! JWT issuance and verification, plus opaque refresh tokens.

use anyhow::Context;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub const TOKEN_PREFIX: &str = "Bearer ";
const ISSUER: &str = "device-api";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    #[serde(default)]
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
}

/// The authenticated identity attached to a request once its credential has
/// been validated. Constructed once per request, immutable, never persisted.
#[derive(Debug, Clone)]
pub struct Principal {
    pub account_id: i64,
    pub role: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            account_id: claims.user_id,
            role: claims.role,
            issued_at: claims.iat,
            expires_at: claims.exp,
        }
    }
}

/// HS256 signer/verifier built once at startup from configuration.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry: Duration,
}

impl TokenSigner {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry: Duration::hours(expiry_hours),
        }
    }

    /// Sign a fresh token for the account. Returns the token and its
    /// expiry instant.
    pub fn generate(
        &self,
        account_id: i64,
        role: &str,
    ) -> Result<(String, DateTime<Utc>), DomainError> {
        let now = Utc::now();
        let expires_at = now + self.expiry;
        let claims = Claims {
            user_id: account_id,
            role: role.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
            iss: ISSUER.to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .context("token signing failed")?;
        Ok((token, expires_at))
    }

    /// Verify signature, structure, and expiry. Expiry is checked with zero
    /// leeway; the kind of failure is preserved for the error taxonomy.
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => Ok(data.claims),
            Err(err) => Err(match err.kind() {
                ErrorKind::ExpiredSignature => DomainError::ExpiredToken,
                ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Utf8(_) => {
                    DomainError::MalformedToken
                }
                ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => {
                    DomainError::InvalidClaims
                }
                _ => DomainError::InvalidToken,
            }),
        }
    }
}

/// Opaque refresh token: 32 random bytes, URL-safe base64. There is no
/// server-side refresh store; possession plus valid credentials re-issue.
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new("super_duper_secret_key", 72)
    }

    #[test]
    fn claims_round_trip() {
        let (token, expires_at) = signer().generate(42, "ADMIN").unwrap();
        let claims = signer().verify(&token).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.role, "ADMIN");
        assert_eq!(claims.iss, "device-api");
        assert_eq!(claims.exp, expires_at.timestamp());
        assert!(claims.iat <= claims.exp);
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        // Negative expiry dates the token in the past.
        let stale = TokenSigner::new("super_duper_secret_key", -1);
        let (token, _) = stale.generate(1, "ADMIN").unwrap();
        let err = signer().verify(&token).unwrap_err();
        assert!(matches!(err, DomainError::ExpiredToken));
    }

    #[test]
    fn foreign_key_is_rejected_as_invalid() {
        let other = TokenSigner::new("some_other_secret", 72);
        let (token, _) = other.generate(1, "ADMIN").unwrap();
        let err = signer().verify(&token).unwrap_err();
        assert!(matches!(err, DomainError::InvalidToken));
    }

    #[test]
    fn garbage_is_rejected_as_malformed() {
        let err = signer().verify("not-a-jwt").unwrap_err();
        assert!(matches!(err, DomainError::MalformedToken));
    }

    #[test]
    fn principal_mirrors_claims() {
        let (token, _) = signer().generate(7, "ADMIN").unwrap();
        let claims = signer().verify(&token).unwrap();
        let principal = Principal::from(claims);
        assert_eq!(principal.account_id, 7);
        assert_eq!(principal.role, "ADMIN");
        assert!(principal.issued_at <= principal.expires_at);
    }

    #[test]
    fn refresh_tokens_are_unique_and_url_safe() {
        let a = generate_refresh_token();
        let b = generate_refresh_token();
        assert_ne!(a, b);
        assert!(a.len() >= 43);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || "-_=".contains(c)));
    }
}
