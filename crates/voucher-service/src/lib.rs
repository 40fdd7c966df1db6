//! # voucher-service: Voucher Use Cases
//!
//! The operations an admin front end calls: voucher CRUD with code
//! uniqueness and paging, bulk CSV import with a per-row report, and CSV
//! export.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Voucher Request Flow                             │
//! │                                                                         │
//! │  Adapter (voucher-cli, HTTP handler, ...)                              │
//! │       │  CancellationToken + request                                    │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  voucher-service (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐  ┌────────────────┐  ┌────────────────┐   │   │
//! │  │   │ VoucherService │  │  CsvImporter   │  │  CsvExporter   │   │   │
//! │  │   │  (service.rs)  │  │  (import.rs)   │  │  (export.rs)   │   │   │
//! │  │   └───────┬────────┘  └───────┬────────┘  └───────┬────────┘   │   │
//! │  │           └───────────────────┼───────────────────┘            │   │
//! │  │                               │ cancellable(...)               │   │
//! │  └───────────────────────────────┼────────────────────────────────┘   │
//! │                                  ▼                                      │
//! │                        Arc<dyn VoucherStore>                            │
//! │                     (voucher_db::VoucherRepository)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! let store: Arc<dyn VoucherStore> = Arc::new(db.vouchers());
//! let cancel = CancellationToken::new();
//!
//! let report = CsvImporter::new(store.clone()).import(&cancel, file).await?;
//! let csv = CsvExporter::new(store).export(&cancel).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

mod cancel;
pub mod error;
pub mod export;
pub mod import;
pub mod service;

#[cfg(test)]
mod test_support;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ServiceError, ServiceResult};
pub use export::{CsvExporter, EXPORT_FILE_NAME};
pub use import::{CsvImporter, RowFailure};
pub use service::VoucherService;
