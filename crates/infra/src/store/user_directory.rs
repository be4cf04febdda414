use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;
use winnerlens_auth::UserAccount;
use winnerlens_core::UserId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("email already registered")]
    EmailTaken,

    #[error("user directory unavailable")]
    Unavailable,
}

/// Account storage with unique, case-normalized emails.
pub trait UserDirectory: Send + Sync {
    /// Insert `account` unless its email is already registered (atomic check-and-insert).
    fn insert(&self, account: UserAccount) -> Result<(), DirectoryError>;
    fn get(&self, id: UserId) -> Option<UserAccount>;
    fn find_by_email(&self, email: &str) -> Option<UserAccount>;
}

impl<S> UserDirectory for Arc<S>
where
    S: UserDirectory + ?Sized,
{
    fn insert(&self, account: UserAccount) -> Result<(), DirectoryError> {
        (**self).insert(account)
    }

    fn get(&self, id: UserId) -> Option<UserAccount> {
        (**self).get(id)
    }

    fn find_by_email(&self, email: &str) -> Option<UserAccount> {
        (**self).find_by_email(email)
    }
}

#[derive(Debug, Default)]
struct Accounts {
    by_id: HashMap<UserId, UserAccount>,
    by_email: HashMap<String, UserId>,
}

/// In-memory user directory for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    inner: RwLock<Accounts>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn insert(&self, account: UserAccount) -> Result<(), DirectoryError> {
        let mut accounts = self.inner.write().map_err(|_| DirectoryError::Unavailable)?;
        if accounts.by_email.contains_key(&account.email) {
            return Err(DirectoryError::EmailTaken);
        }
        accounts.by_email.insert(account.email.clone(), account.id);
        accounts.by_id.insert(account.id, account);
        Ok(())
    }

    fn get(&self, id: UserId) -> Option<UserAccount> {
        let accounts = self.inner.read().ok()?;
        accounts.by_id.get(&id).cloned()
    }

    fn find_by_email(&self, email: &str) -> Option<UserAccount> {
        let accounts = self.inner.read().ok()?;
        let id = accounts.by_email.get(email)?;
        accounts.by_id.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use winnerlens_auth::RegisterUser;

    fn account(email: &str) -> UserAccount {
        let cmd = RegisterUser {
            email: email.to_string(),
            password: "secret1".to_string(),
            name: None,
        };
        UserAccount::new(UserId::new(), &cmd, "hash".to_string(), Utc::now())
    }

    #[test]
    fn insert_then_lookup() {
        let dir = InMemoryUserDirectory::new();
        let acc = account("a@b.co");
        dir.insert(acc.clone()).unwrap();

        assert_eq!(dir.get(acc.id), Some(acc.clone()));
        assert_eq!(dir.find_by_email("a@b.co"), Some(acc));
        assert_eq!(dir.find_by_email("x@b.co"), None);
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let dir = InMemoryUserDirectory::new();
        dir.insert(account("a@b.co")).unwrap();
        assert_eq!(dir.insert(account("a@b.co")), Err(DirectoryError::EmailTaken));
    }
}
