//! # Domain Types
//!
//! Core domain types used throughout the voucher admin system.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ VoucherRequest  │   │   NewVoucher    │   │    Voucher      │       │
//! │  │  ─────────────  │──►│  ─────────────  │──►│  ─────────────  │       │
//! │  │  code           │   │  validated,     │   │  id (UUID)      │       │
//! │  │  discount_pct   │   │  timestamped    │   │  code           │       │
//! │  │  expiry_date?   │   │                 │   │  created_at ... │       │
//! │  └─────────────────┘   └─────────────────┘   └────────┬────────┘       │
//! │        input              to the store        stored  │                │
//! │                                                       ▼                │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ImportReport   │   │  VoucherPage    │   │ VoucherResponse │       │
//! │  │  FailedRow[]    │   │  data + paging  │   │  wire shape     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every voucher has:
//! - `id`: UUID v4 - immutable, generated by the store
//! - `code`: human-readable business key, unique ignoring case, mutable via update

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::pagination::PageMetadata;

// =============================================================================
// Voucher
// =============================================================================

/// A persisted discount voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Voucher {
    /// Unique identifier (UUID v4), assigned by the store.
    pub id: String,

    /// Voucher code as entered (case preserved).
    pub code: String,

    /// Discount granted, in percent (1..=100).
    pub discount_percent: i32,

    /// Last day the voucher can be redeemed.
    pub expiry_date: NaiveDate,

    pub created_at: DateTime<Utc>,

    /// Refreshed on every successful update.
    pub updated_at: DateTime<Utc>,
}

impl Voucher {
    /// Checks whether this voucher's code equals `code`, ignoring case.
    pub fn has_code(&self, code: &str) -> bool {
        codes_equal(&self.code, code)
    }
}

/// A validated voucher that has not been stored yet.
///
/// The service stamps both timestamps; the store only adds the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVoucher {
    pub code: String,
    pub discount_percent: i32,
    pub expiry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewVoucher {
    /// Builds a voucher whose timestamps are both `now`.
    pub fn new(
        code: impl Into<String>,
        discount_percent: i32,
        expiry_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        NewVoucher {
            code: code.into(),
            discount_percent,
            expiry_date,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Case-folded form of a code. Two codes collide exactly when their keys
/// are equal; stores index this value to enforce uniqueness.
pub fn code_key(code: &str) -> String {
    code.chars().flat_map(char::to_lowercase).collect()
}

/// Compares two voucher codes the way the uniqueness rule does.
pub fn codes_equal(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

// =============================================================================
// Requests & Responses
// =============================================================================

/// Body of a create or update request.
///
/// Fields default when missing so that validation, not deserialization,
/// reports what is wrong with the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VoucherRequest {
    #[serde(default)]
    pub code: String,

    #[serde(default)]
    pub discount_percent: i32,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub expiry_date: Option<NaiveDate>,
}

/// Voucher as returned to API consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VoucherResponse {
    pub id: String,
    pub code: String,
    pub discount_percent: i32,
    #[ts(as = "String")]
    pub expiry_date: NaiveDate,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl From<Voucher> for VoucherResponse {
    fn from(v: Voucher) -> Self {
        VoucherResponse {
            id: v.id,
            code: v.code,
            discount_percent: v.discount_percent,
            expiry_date: v.expiry_date,
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

/// One page of vouchers plus its pagination summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VoucherPage {
    pub data: Vec<VoucherResponse>,
    pub paging: PageMetadata,
}

// =============================================================================
// Import Report
// =============================================================================

/// A CSV row that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FailedRow {
    /// 1-based row number in the uploaded file (the header is row 1).
    pub row: usize,
    pub reason: String,
}

/// Outcome of a bulk CSV import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ImportReport {
    pub success_count: usize,
    pub failed_count: usize,
    /// Failures in the order they were encountered.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_rows: Vec<FailedRow>,
}

impl ImportReport {
    pub fn record_success(&mut self) {
        self.success_count += 1;
    }

    pub fn record_failure(&mut self, row: usize, reason: impl Into<String>) {
        self.failed_count += 1;
        self.failed_rows.push(FailedRow {
            row,
            reason: reason.into(),
        });
    }
}

// =============================================================================
// Response Envelope
// =============================================================================

/// JSON envelope every admin response is wrapped in.
///
/// ```json
/// { "message": "Vouchers retrieved successfully.", "data": [...], "paging": {...} }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebResponse<T> {
    pub message: String,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<PageMetadata>,
}

impl<T> WebResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        WebResponse {
            message: message.into(),
            data: Some(data),
            paging: None,
        }
    }

    /// An envelope with no payload (e.g. after a delete).
    pub fn empty(message: impl Into<String>) -> Self {
        WebResponse {
            message: message.into(),
            data: None,
            paging: None,
        }
    }

    pub fn with_paging(mut self, paging: PageMetadata) -> Self {
        self.paging = Some(paging);
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
