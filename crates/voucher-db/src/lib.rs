//! # voucher-db: Database Layer for the Voucher Catalog
//!
//! This crate provides database access for the voucher admin system.
//! It uses SQLite for storage with sqlx for async operations, and implements
//! the [`voucher_core::VoucherStore`] contract.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Voucher Data Flow                                │
//! │                                                                         │
//! │  VoucherService (voucher-service)                                      │
//! │       │  Arc<dyn VoucherStore>                                          │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     voucher-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────────┐  ┌──────────────┐ │   │
//! │  │   │   Database    │    │   Repositories    │  │  Migrations  │ │   │
//! │  │   │   (pool.rs)   │    │   (voucher.rs)    │  │  (embedded)  │ │   │
//! │  │   │               │    │                   │  │              │ │   │
//! │  │   │ SqlitePool    │◄───│ VoucherRepository │  │ 001_create_  │ │   │
//! │  │   │ Management    │    │ impl VoucherStore │  │ vouchers.sql │ │   │
//! │  │   └───────────────┘    └───────────────────┘  └──────────────┘ │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (vouchers.db)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use voucher_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("vouchers.db")).await?;
//! let store: Arc<dyn VoucherStore> = Arc::new(db.vouchers());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};

pub use repository::voucher::VoucherRepository;
