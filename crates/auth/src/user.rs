//! Seller accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use winnerlens_core::{DomainError, DomainResult, UserId};

// ─────────────────────────────────────────────────────────────────────────────
// Subscription
// ─────────────────────────────────────────────────────────────────────────────

/// Paid plan of an account. New accounts start on `Basic`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubscriptionTier {
    #[default]
    Basic,
    Pro,
    Enterprise,
}

impl core::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SubscriptionTier::Basic => write!(f, "Basic"),
            SubscriptionTier::Pro => write!(f, "Pro"),
            SubscriptionTier::Enterprise => write!(f, "Enterprise"),
        }
    }
}

/// Billing state of an account. New accounts start on a `trial`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[default]
    Trial,
    Active,
    Cancelled,
    Expired,
}

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_NAME_LEN: usize = 2;

/// Command: sign up a new seller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUser {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

impl RegisterUser {
    /// Validate and normalize the input.
    ///
    /// The email is trimmed and lower-cased; an empty name is treated as absent.
    pub fn validated(self) -> DomainResult<Self> {
        let email = normalize_email(&self.email)?;

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::invalid_field(
                "password",
                format!("password must be at least {MIN_PASSWORD_LEN} characters"),
            ));
        }

        let name = match self.name.map(|n| n.trim().to_string()) {
            Some(n) if n.is_empty() => None,
            Some(n) if n.chars().count() < MIN_NAME_LEN => {
                return Err(DomainError::invalid_field(
                    "name",
                    format!("name must be at least {MIN_NAME_LEN} characters"),
                ));
            }
            other => other,
        };

        Ok(Self {
            email,
            password: self.password,
            name,
        })
    }
}

/// Command: authenticate with email + password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

impl LoginUser {
    pub fn validated(self) -> DomainResult<Self> {
        let email = normalize_email(&self.email)?;
        if self.password.is_empty() {
            return Err(DomainError::invalid_field("password", "password is required"));
        }
        Ok(Self {
            email,
            password: self.password,
        })
    }
}

/// Trim, lower-case and structurally check an email address.
pub fn normalize_email(raw: &str) -> DomainResult<String> {
    let email = raw.trim().to_lowercase();
    let invalid = || DomainError::invalid_field("email", "invalid email format");

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    let domain_ok = !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty());

    if local.is_empty() || !domain_ok || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    Ok(email)
}

// ─────────────────────────────────────────────────────────────────────────────
// Account
// ─────────────────────────────────────────────────────────────────────────────

/// A registered seller account, including its password hash.
///
/// Never serialize this type directly; expose [`UserProfile`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub subscription_tier: SubscriptionTier,
    pub subscription_status: SubscriptionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserAccount {
    /// Build a new trial account from an already-validated registration.
    pub fn new(
        id: UserId,
        cmd: &RegisterUser,
        password_hash: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email: cmd.email.clone(),
            password_hash,
            name: cmd.name.clone(),
            subscription_tier: SubscriptionTier::default(),
            subscription_status: SubscriptionStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            subscription_tier: self.subscription_tier,
            subscription_status: self.subscription_status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Public view of an account (no credentials).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub subscription_tier: SubscriptionTier,
    pub subscription_status: SubscriptionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
