//! `winnerlens-auth` — accounts, credentials and bearer tokens.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod claims;
pub mod jwt;
pub mod password;
pub mod user;

pub use claims::{validate_claims, JwtClaims, TokenValidationError};
pub use jwt::{Hs256JwtIssuer, Hs256JwtValidator, JwtValidator, TokenError, TokenIssuer};
pub use password::{PasswordHashError, PasswordHasher};
pub use user::{
    normalize_email, LoginUser, RegisterUser, SubscriptionStatus, SubscriptionTier, UserAccount,
    UserProfile,
};
