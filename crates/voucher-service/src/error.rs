//! # Service Error Types
//!
//! Errors returned by [`crate::VoucherService`], [`crate::CsvImporter`] and
//! [`crate::CsvExporter`].
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Service Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Caller input   │  │     Store       │  │     CSV streams         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Validation     │  │  Store          │  │  StreamRead             │ │
//! │  │  Conflict       │  │                 │  │  Export                 │ │
//! │  │  NotFound       │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Cancelled: the caller's CancellationToken fired mid-operation          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A single bad row in an import is not a `ServiceError`; it is recorded in
//! the [`voucher_core::ImportReport`] as a [`crate::RowFailure`].

use thiserror::Error;
use voucher_core::{StoreError, ValidationErrors};

/// Result type alias for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// One or more request fields broke a rule.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Another voucher already uses this code (ignoring case).
    #[error("Voucher code '{code}' already exists")]
    Conflict { code: String },

    /// No voucher with this id.
    #[error("Voucher not found: {id}")]
    NotFound { id: String },

    /// The store failed for a reason the caller cannot fix.
    #[error("Store error: {0}")]
    Store(StoreError),

    /// The CSV upload could not be read at all.
    #[error("Failed to read CSV input: {0}")]
    StreamRead(#[from] csv::Error),

    /// The CSV download could not be produced.
    #[error("Failed to write CSV export: {0}")]
    Export(String),

    /// The operation was cancelled before it completed.
    #[error("Operation cancelled")]
    Cancelled,
}

impl ServiceError {
    /// Whether the caller sent something wrong (as opposed to a server fault).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServiceError::Validation(_)
                | ServiceError::Conflict { .. }
                | ServiceError::NotFound { .. }
                | ServiceError::StreamRead(_)
        )
    }
}

/// `NotFound` keeps its meaning; every other store failure is opaque.
///
/// Constraint violations are turned into [`ServiceError::Conflict`] by the
/// operations that know which code was being written.
impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => ServiceError::NotFound { id },
            other => ServiceError::Store(other),
        }
    }
}
