//! HS256 token signing and verification.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::claims::{validate_claims, JwtClaims, TokenValidationError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, malformed token, wrong algorithm, ...
    #[error("invalid token: {0}")]
    Invalid(String),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Verifies bearer tokens and yields their claims.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError>;
}

/// Mints signed tokens.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, claims: &JwtClaims) -> Result<String, TokenError>;
}

/// HS256 validator.
///
/// `jsonwebtoken` only checks the signature here; the time window is checked by
/// [`validate_claims`] against the caller-supplied `now` so it stays testable.
pub struct Hs256JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl Hs256JwtValidator {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            key: DecodingKey::from_secret(secret.as_ref()),
            validation,
        }
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError> {
        let data = decode::<JwtClaims>(token, &self.key, &self.validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

/// HS256 issuer.
pub struct Hs256JwtIssuer {
    key: EncodingKey,
}

impl Hs256JwtIssuer {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            key: EncodingKey::from_secret(secret.as_ref()),
        }
    }
}

impl TokenIssuer for Hs256JwtIssuer {
    fn issue(&self, claims: &JwtClaims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::SubscriptionTier;
    use chrono::{Duration, TimeZone};
    use winnerlens_core::UserId;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn claims() -> JwtClaims {
        JwtClaims {
            sub: UserId::new(),
            email: "seller@example.com".to_string(),
            subscription_tier: SubscriptionTier::Pro,
            issued_at: now(),
            expires_at: now() + Duration::days(7),
        }
    }

    #[test]
    fn issued_token_validates() {
        let issuer = Hs256JwtIssuer::new("secret");
        let validator = Hs256JwtValidator::new("secret");
        let claims = claims();

        let token = issuer.issue(&claims).unwrap();
        let decoded = validator.validate(&token, now() + Duration::hours(1)).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = Hs256JwtIssuer::new("secret").issue(&claims()).unwrap();
        let err = Hs256JwtValidator::new("other").validate(&token, now()).unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = Hs256JwtIssuer::new("secret").issue(&claims()).unwrap();
        let err = Hs256JwtValidator::new("secret")
            .validate(&token, now() + Duration::days(8))
            .unwrap_err();
        assert_eq!(err, TokenError::Claims(TokenValidationError::Expired));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = Hs256JwtValidator::new("secret").validate("not.a.token", now()).unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)));
    }
}
