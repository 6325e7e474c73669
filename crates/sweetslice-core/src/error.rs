//! # Error Types
//!
//! Domain-specific error types for sweetslice-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sweetslice-core errors (this file)                                    │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  sweetslice-store errors (separate crate)                              │
//! │  └── StoreError       - Snapshot persistence failures                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → caller               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, email, counts)
//! 3. Errors are enum variants, never String
//! 4. Every error here is recoverable at the caller boundary

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. None of them is fatal to
/// the process; the presentation layer translates them to user messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A referenced product does not exist in the catalog.
    ///
    /// ## When This Occurs
    /// - A cart line references an id that was removed from the catalog
    /// - A lookup was made with a stale id
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Requested quantity exceeds the current stock level.
    ///
    /// ## When This Occurs
    /// Only during checkout. The cart itself performs no stock validation,
    /// so a cart may legitimately hold more of an item than is in stock;
    /// order placement is the sole enforcement point.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: u32,
        requested: u32,
    },

    /// Registration attempted with an email that is already taken.
    ///
    /// Email comparison is case-insensitive.
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    /// Login failed.
    ///
    /// Deliberately does not distinguish "unknown email" from "wrong
    /// password" to avoid user enumeration.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller-supplied input doesn't meet requirements. Used for
/// early validation at the service boundary before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Chocolate Cake".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Chocolate Cake: available 3, requested 5"
        );
    }

    #[test]
    fn test_invalid_credentials_is_opaque() {
        // The message must not leak whether the email exists.
        let err = CoreError::InvalidCredentials;
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
