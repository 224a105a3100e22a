//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures a client can correct (bad
/// fields, malformed ids, uniqueness). Storage and transport failures belong
/// to the layers that own them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A document failed schema validation (missing field, length, type).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was malformed (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested document does not exist.
    #[error("not found")]
    NotFound,

    /// A field that must be unique across a collection already holds this value.
    #[error("expected `{field}` to be unique")]
    Duplicate { field: String, value: String },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// Message suitable for returning to a client.
    ///
    /// Validation errors expose the underlying message without the
    /// `validation failed:` prefix.
    pub fn client_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_message_names_the_field() {
        let err = DomainError::duplicate("username", "root");
        assert_eq!(err.to_string(), "expected `username` to be unique");
    }

    #[test]
    fn client_message_strips_validation_prefix() {
        let err = DomainError::validation("title is required");
        assert_eq!(err.client_message(), "title is required");
        assert_eq!(err.to_string(), "validation failed: title is required");
    }
}
