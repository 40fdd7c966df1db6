//! # Store Contract
//!
//! The persistence operations the voucher service depends on.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  VoucherService / CsvImporter / CsvExporter                             │
//! │       │                                                                 │
//! │       │  Arc<dyn VoucherStore>                                          │
//! │       ▼                                                                 │
//! │  VoucherStore (THIS TRAIT)                                              │
//! │  ├── create / exists_by_code / get_by_id                                │
//! │  ├── list (page + filtered count) / list_all (export)                   │
//! │  └── update / delete                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  voucher_db::VoucherRepository (SQLite)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Implementations own their connection; callers treat the store as a
//! shared, already-initialized dependency.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::pagination::SortOrder;
use crate::types::{NewVoucher, Voucher};

/// Search and ordering applied to list queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoucherFilter {
    /// Case-insensitive substring of the code; empty matches everything.
    pub search: String,
    /// Order by creation time.
    pub order: SortOrder,
}

impl VoucherFilter {
    pub fn new(search: impl Into<String>, order: SortOrder) -> Self {
        VoucherFilter {
            search: search.into(),
            order,
        }
    }
}

/// Durable voucher storage.
///
/// ## Guarantees
/// - Code uniqueness is enforced ignoring case; violations surface as
///   [`crate::StoreError::ConstraintViolation`], never as a generic failure.
/// - `list` counts under the same filter as the page it returns.
/// - Absence is never an error for `exists_by_code` or `delete`.
#[async_trait]
pub trait VoucherStore: Send + Sync {
    /// Inserts a voucher and returns it with its generated id.
    async fn create(&self, voucher: NewVoucher) -> StoreResult<Voucher>;

    /// Whether any voucher uses `code`, ignoring case.
    async fn exists_by_code(&self, code: &str) -> StoreResult<bool>;

    /// Fetches one voucher; `NotFound` when the id is unknown.
    async fn get_by_id(&self, id: &str) -> StoreResult<Voucher>;

    /// Returns up to `limit` vouchers after skipping `offset`, together with
    /// the number of vouchers matching `filter`.
    async fn list(
        &self,
        limit: u32,
        offset: u64,
        filter: &VoucherFilter,
    ) -> StoreResult<(Vec<Voucher>, i64)>;

    /// Every voucher matching `filter`, unpaginated.
    async fn list_all(&self, filter: &VoucherFilter) -> StoreResult<Vec<Voucher>>;

    /// Overwrites code, discount, expiry and `updated_at` of an existing voucher.
    async fn update(&self, voucher: &Voucher) -> StoreResult<Voucher>;

    /// Hard-deletes a voucher. Returns whether a row was removed.
    async fn delete(&self, id: &str) -> StoreResult<bool>;
}
