//! Stateless bearer tokens: HS256 JWTs carrying the subject user id and an
//! expiry. There is no server-side session store and no revocation list;
//! a token is good until its expiry, by design.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, TokenError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub exp: usize,
}

pub struct TokenService {
    secret: String,
    ttl_minutes: i64,
}

impl TokenService {
    pub fn new(secret: impl Into<String>, ttl_minutes: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_minutes,
        }
    }

    pub fn issue(&self, user_id: i64) -> Result<String, CoreError> {
        self.issue_with_expiry(user_id, Utc::now() + Duration::minutes(self.ttl_minutes))
    }

    fn issue_with_expiry(
        &self,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<String, CoreError> {
        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| CoreError::Corrupt(format!("token signing failed: {e}")))
    }

    /// Verifies signature and expiry; returns the subject user id. Any
    /// failure is a flat rejection — there is no degraded-trust outcome.
    pub fn validate(&self, token: &str) -> Result<i64, TokenError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed,
        })?;

        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret", 30)
    }

    #[test]
    fn issue_validate_round_trip() {
        let tokens = service();
        for user_id in [1, 42, i64::MAX] {
            let token = tokens.issue(user_id).unwrap();
            assert_eq!(tokens.validate(&token).unwrap(), user_id);
        }
    }

    #[test]
    fn expired_token_rejected() {
        let tokens = service();
        let token = tokens
            .issue_with_expiry(7, Utc::now() - Duration::minutes(5))
            .unwrap();
        assert_eq!(tokens.validate(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn tampered_signature_rejected() {
        let tokens = service();
        let token = tokens.issue(7).unwrap();

        // Flip one character in the middle of the signature segment.
        let (head, sig) = token.rsplit_once('.').unwrap();
        let mut sig: Vec<u8> = sig.bytes().collect();
        let mid = sig.len() / 2;
        sig[mid] = if sig[mid] == b'A' { b'B' } else { b'A' };
        let tampered = format!("{head}.{}", String::from_utf8(sig).unwrap());

        assert_eq!(
            tokens.validate(&tampered).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn wrong_key_rejected() {
        let token = service().issue(7).unwrap();
        let other = TokenService::new("a-different-secret", 30);
        assert_eq!(
            other.validate(&token).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn garbage_is_malformed() {
        let tokens = service();
        assert_eq!(
            tokens.validate("definitely.not.a-jwt").unwrap_err(),
            TokenError::Malformed
        );
        assert_eq!(tokens.validate("").unwrap_err(), TokenError::Malformed);
    }
}
