//! # voucher-core: Pure Business Logic for the Voucher Catalog
//!
//! This crate holds the domain model of the voucher admin system and the
//! rules every voucher must satisfy. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Voucher Admin Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Admin adapter (CLI / HTTP, out of core)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │      voucher-service: VoucherService, CsvImporter, CsvExporter  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Arc<dyn VoucherStore>                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ voucher-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐  ┌──────────┐  │   │
//! │  │   │   types   │  │ validation │  │pagination │  │  store   │  │   │
//! │  │   │  Voucher  │  │  requests  │  │ PageMeta  │  │  trait   │  │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘  └──────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │             voucher-db: VoucherRepository (SQLite)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Voucher entity, requests, responses, import report
//! - [`validation`] - Field rules for voucher requests
//! - [`pagination`] - Page requests, sort order, page metadata
//! - [`store`] - The persistence contract implemented by `voucher-db`
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use voucher_core::pagination::{PageMetadata, PageRequest};
//!
//! let page = PageRequest::new(3, 10).unwrap();
//! assert_eq!(page.offset(), 20);
//!
//! let meta = PageMetadata::new(page, 25);
//! assert_eq!(meta.total_page, 3);
//! assert!(!meta.has_next);
//! assert!(meta.has_previous);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod pagination;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{StoreError, StoreResult, ValidationError, ValidationErrors};
pub use pagination::{PageMetadata, PageRequest, SortOrder};
pub use store::{VoucherFilter, VoucherStore};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Smallest discount a voucher may grant, in percent.
pub const MIN_DISCOUNT_PERCENT: i32 = 1;

/// Largest discount a voucher may grant, in percent.
pub const MAX_DISCOUNT_PERCENT: i32 = 100;

/// Maximum voucher code length.
///
/// Mirrors the width of the `code` column in the voucher table.
pub const MAX_CODE_LENGTH: usize = 100;

/// Page used when the caller does not ask for one.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// `chrono` format of an expiry date on the wire and in CSV files.
pub const EXPIRY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Column names of the voucher CSV format, in order.
pub const CSV_HEADER: [&str; 3] = ["voucher_code", "discount_percent", "expiry_date"];
