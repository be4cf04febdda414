//! Storage abstractions with in-memory implementations.

pub mod owner_store;
pub mod user_directory;

pub use owner_store::{InMemoryOwnerStore, OwnerStore, StoreError};
pub use user_directory::{DirectoryError, InMemoryUserDirectory, UserDirectory};
