//! Infrastructure layer: storage adapters and application services.
//!
//! Storage sits behind the [`store::OwnerStore`] and [`store::UserDirectory`]
//! traits; only in-memory implementations ship today.

pub mod accounts;
pub mod catalog;
pub mod error;
pub mod query;
pub mod store;

pub use accounts::{AccountService, AuthSession, DEFAULT_TOKEN_TTL_DAYS};
pub use catalog::ProductCatalog;
pub use error::{ServiceError, ServiceResult};
pub use query::{Page, Pagination, ProductQuery, SortBy, SortOrder, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT};
pub use store::{
    DirectoryError, InMemoryOwnerStore, InMemoryUserDirectory, OwnerStore, StoreError, UserDirectory,
};
