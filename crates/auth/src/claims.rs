use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use winnerlens_core::UserId;

use crate::user::{SubscriptionTier, UserAccount};

/// JWT claims model (transport-agnostic).
///
/// `iat`/`exp` are encoded as Unix seconds so the token stays readable by any
/// standard JWT tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject: the account the token was issued to.
    pub sub: UserId,

    pub email: String,

    #[serde(rename = "subscriptionTier")]
    pub subscription_tier: SubscriptionTier,

    /// Issued-at timestamp.
    #[serde(rename = "iat", with = "chrono::serde::ts_seconds")]
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    #[serde(rename = "exp", with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

impl JwtClaims {
    /// Claims for `account`, valid from `now` for `ttl`.
    pub fn for_account(account: &UserAccount, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: account.id,
            email: account.email.clone(),
            subscription_tier: account.subscription_tier,
            issued_at: now,
            expires_at: now + ttl,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate JWT claims.
///
/// Note: this validates the *claims* only. Signature verification lives in
/// [`crate::jwt`].
pub fn validate_claims(claims: &JwtClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn claims(issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> JwtClaims {
        JwtClaims {
            sub: UserId::new(),
            email: "seller@example.com".to_string(),
            subscription_tier: SubscriptionTier::Basic,
            issued_at,
            expires_at,
        }
    }

    fn t(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn valid_within_window() {
        assert_eq!(validate_claims(&claims(t(1), t(3)), t(2)), Ok(()));
    }

    #[test]
    fn expired_at_boundary() {
        assert_eq!(
            validate_claims(&claims(t(1), t(3)), t(3)),
            Err(TokenValidationError::Expired)
        );
    }

    #[test]
    fn not_yet_valid() {
        assert_eq!(
            validate_claims(&claims(t(2), t(3)), t(1)),
            Err(TokenValidationError::NotYetValid)
        );
    }

    #[test]
    fn inverted_window() {
        assert_eq!(
            validate_claims(&claims(t(3), t(1)), t(2)),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }

    #[test]
    fn serializes_standard_claim_names() {
        let json = serde_json::to_value(claims(t(1), t(3))).unwrap();
        assert_eq!(json["iat"], t(1).timestamp());
        assert_eq!(json["exp"], t(3).timestamp());
        assert_eq!(json["subscriptionTier"], "Basic");
    }
}
