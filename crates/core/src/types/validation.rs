//! Boundary validation errors for outgoing payloads.

use thiserror::Error;

/// A request payload failed validation before it was sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field is blank.
    #[error("{field} cannot be blank")]
    Blank {
        /// Field name as sent on the wire.
        field: &'static str,
    },

    /// A text field exceeds its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Field name as sent on the wire.
        field: &'static str,
        /// Maximum allowed length.
        max: usize,
    },

    /// A slug contains characters outside `[A-Za-z0-9_-]`.
    #[error("slug may only contain letters, numbers, hyphens and underscores: {0}")]
    InvalidSlug(String),

    /// A price is negative.
    #[error("price cannot be negative")]
    NegativePrice,

    /// A partial update sets no fields.
    #[error("patch must set at least one field")]
    EmptyPatch,
}
