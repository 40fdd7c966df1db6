//! # Error Types
//!
//! Domain-specific error types for voucher-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  voucher-core errors (this file)                                       │
//! │  ├── ValidationError   - One field-level input violation               │
//! │  ├── ValidationErrors  - Every violation found in one request          │
//! │  └── StoreError        - What any VoucherStore implementation reports   │
//! │                                                                         │
//! │  voucher-db errors (separate crate)                                    │
//! │  └── DbError           - sqlx failures, converted into StoreError      │
//! │                                                                         │
//! │  voucher-service errors (separate crate)                               │
//! │  └── ServiceError      - What adapters see                             │
//! │                                                                         │
//! │  Flow: DbError → StoreError ─┐                                         │
//! │        ValidationErrors ─────┴──► ServiceError → Adapter               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, id, etc.)
//! 3. Errors are enum variants, never String

use std::fmt;

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any store call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be a positive number.
    #[error("{field} must be a positive number")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Name of the field this error refers to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Every validation failure found in a single request, one per field.
///
/// Never empty: validators return `Ok(())` instead of an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Wraps collected errors, or returns `None` when there are none.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(ValidationErrors(errors))
        }
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Human-readable messages, one per violated field.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        ValidationErrors(vec![err])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

// =============================================================================
// Store Error
// =============================================================================

/// Errors reported by a [`crate::VoucherStore`] implementation.
///
/// Backends translate their native errors into these three kinds so the
/// service never needs to know which database is underneath.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No voucher exists for the requested id.
    #[error("voucher not found: {id}")]
    NotFound { id: String },

    /// The store rejected the write (unique code index, CHECK constraint).
    ///
    /// ## When This Occurs
    /// - Two requests race between the existence check and the insert
    /// - A CSV row duplicates a code already in the catalog
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Any other backend failure (connection, I/O, query).
    #[error("store failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(id: impl Into<String>) -> Self {
        StoreError::NotFound { id: id.into() }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
