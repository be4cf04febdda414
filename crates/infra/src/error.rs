//! Service-layer errors.

use thiserror::Error;

use winnerlens_auth::{PasswordHashError, TokenError};
use winnerlens_core::DomainError;

use crate::store::{DirectoryError, StoreError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("product not found")]
    ProductNotFound,

    #[error("email already registered")]
    EmailExists,

    /// Unknown email or wrong password; deliberately indistinguishable.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("user not found")]
    UserNotFound,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    PasswordHash(#[from] PasswordHashError),

    #[error("storage unavailable")]
    StorageUnavailable,
}

impl From<DirectoryError> for ServiceError {
    fn from(value: DirectoryError) -> Self {
        match value {
            DirectoryError::EmailTaken => Self::EmailExists,
            DirectoryError::Unavailable => Self::StorageUnavailable,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Unavailable => Self::StorageUnavailable,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
