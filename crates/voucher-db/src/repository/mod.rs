//! # Repository Module
//!
//! Database repository implementations.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  VoucherService                                                        │
//! │       │                                                                 │
//! │       │  store.list(10, 20, &filter)                                    │
//! │       ▼                                                                 │
//! │  VoucherRepository (impl VoucherStore)                                 │
//! │  ├── create / exists_by_code / get_by_id                               │
//! │  ├── list / list_all                                                   │
//! │  └── update / delete                                                   │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`voucher::VoucherRepository`] - Voucher CRUD, search and export listing

pub mod voucher;
