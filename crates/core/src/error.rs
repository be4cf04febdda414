//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Deterministic business-rule failures. Storage and transport errors live in
/// the crates that own those concerns.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input that breaks a field rule (length, range, format, cross-field).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A field rule failed on one named input field (camelCase, as on the wire).
    #[error("validation failed: {message}")]
    InvalidField { field: String, message: String },

    /// A calculation was asked to work on values it is undefined for, such as a
    /// margin over a non-positive price.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_field(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: msg.into(),
        }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Human-readable message without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg) | Self::InvalidArgument(msg) | Self::InvalidId(msg) => msg,
            Self::InvalidField { message, .. } => message,
        }
    }

    /// The offending input field, when the failure is tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidField { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_prefixed_by_category() {
        let err = DomainError::invalid_argument("price must be positive");
        assert_eq!(err.to_string(), "invalid argument: price must be positive");
        assert_eq!(err.message(), "price must be positive");
        assert_eq!(err.field(), None);
    }

    #[test]
    fn field_errors_carry_the_field_name() {
        let err = DomainError::invalid_field("cost", "cost must be lower than price");
        assert_eq!(err.to_string(), "validation failed: cost must be lower than price");
        assert_eq!(err.field(), Some("cost"));
        assert_eq!(err.message(), "cost must be lower than price");
    }
}
