//! Unified error handling for the engine.
//!
//! Every user intent returns `Result<T, EngineError>`. Nothing in this engine
//! is fatal: each variant maps to a user-facing notification or inline field
//! errors, and state is left at the previous valid value on failure. Storage
//! failures never appear here - the store adapter logs and degrades to empty
//! state internally.

use thiserror::Error;

/// A single failed form field, reported inline next to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field name, e.g. `email`.
    pub field: &'static str,
    /// Human-readable message for the field.
    pub message: String,
}

impl FieldError {
    pub(crate) fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// The standard message for a missing required field.
    pub(crate) fn required(field: &'static str) -> Self {
        Self::new(field, "This field is required")
    }
}

/// Application-level error type for the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// One or more form fields failed validation. All failing fields are
    /// collected, not just the first.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Checkout was opened with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Operation referenced a product or order that does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Operation arrived outside the checkout step that allows it.
    #[error("checkout is not at the required step")]
    InvalidStep,

    /// All delivery transports were exhausted without success. The order is
    /// not recorded and the cart is untouched; the user may resubmit.
    #[error("delivery failed: all transports exhausted")]
    Delivery,
}

impl EngineError {
    /// The field errors carried by a validation failure, if any.
    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }
}

/// Result type alias for `EngineError`.
pub type Result<T> = std::result::Result<T, EngineError>;
