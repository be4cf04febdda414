//! Account registration, login and profile lookup.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use winnerlens_auth::{
    JwtClaims, LoginUser, PasswordHasher, RegisterUser, TokenIssuer, UserAccount, UserProfile,
};
use winnerlens_core::UserId;

use crate::error::{ServiceError, ServiceResult};
use crate::store::UserDirectory;

/// Default bearer-token lifetime.
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;

/// A freshly authenticated account and its bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthSession {
    pub user: UserProfile,
    pub token: String,
}

pub struct AccountService<D> {
    directory: D,
    hasher: PasswordHasher,
    issuer: Arc<dyn TokenIssuer>,
    token_ttl: Duration,
}

impl<D> AccountService<D>
where
    D: UserDirectory,
{
    pub fn new(directory: D, hasher: PasswordHasher, issuer: Arc<dyn TokenIssuer>, token_ttl: Duration) -> Self {
        Self {
            directory,
            hasher,
            issuer,
            token_ttl,
        }
    }

    pub fn register(&self, cmd: RegisterUser, now: DateTime<Utc>) -> ServiceResult<AuthSession> {
        let cmd = cmd.validated()?;
        if self.directory.find_by_email(&cmd.email).is_some() {
            return Err(ServiceError::EmailExists);
        }

        let hash = self.hasher.hash(&cmd.password)?;
        let account = UserAccount::new(UserId::new(), &cmd, hash, now);
        // The directory re-checks uniqueness under its lock.
        self.directory.insert(account.clone())?;

        tracing::info!(user_id = %account.id, "account registered");
        self.session_for(&account, now)
    }

    pub fn login(&self, cmd: LoginUser, now: DateTime<Utc>) -> ServiceResult<AuthSession> {
        let cmd = cmd.validated()?;
        let account = self
            .directory
            .find_by_email(&cmd.email)
            .ok_or(ServiceError::InvalidCredentials)?;

        if !self.hasher.verify(&cmd.password, &account.password_hash)? {
            tracing::warn!(user_id = %account.id, "login rejected: wrong password");
            return Err(ServiceError::InvalidCredentials);
        }

        tracing::info!(user_id = %account.id, "login succeeded");
        self.session_for(&account, now)
    }

    pub fn current_user(&self, id: UserId) -> ServiceResult<UserProfile> {
        self.directory
            .get(id)
            .map(|account| account.profile())
            .ok_or(ServiceError::UserNotFound)
    }

    fn session_for(&self, account: &UserAccount, now: DateTime<Utc>) -> ServiceResult<AuthSession> {
        let claims = JwtClaims::for_account(account, now, self.token_ttl);
        let token = self.issuer.issue(&claims)?;
        Ok(AuthSession {
            user: account.profile(),
            token,
        })
    }
}
