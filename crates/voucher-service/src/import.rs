//! # CSV Import
//!
//! Bulk voucher creation from an uploaded CSV file.
//!
//! ## File Format
//! ```text
//! voucher_code,discount_percent,expiry_date     ← row 1, always discarded
//! SAVE10,10,2025-12-31                          ← row 2
//! WINTER25,25,2026-01-15                        ← row 3
//! ```
//!
//! ## Row Processing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Per-Row Checks (first failure wins)                │
//! │                                                                         │
//! │  fewer than 3 columns ──────────────────► "Incomplete data"            │
//! │       │                                                                 │
//! │  column 2 not an integer in 1..=100 ────► "Invalid discount percent"   │
//! │       │                                                                 │
//! │  column 3 not YYYY-MM-DD ───────────────► "Invalid expiry date format" │
//! │       │                                                                 │
//! │  store.create fails ────────────────────► "Database error or           │
//! │       │                                    duplicate code"             │
//! │       ▼                                                                 │
//! │  success_count += 1                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A bad row never stops the import. A stream that cannot be parsed at all
//! fails the whole call before anything is written.

use std::io::Read;
use std::sync::Arc;

use chrono::Utc;
use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use voucher_core::validation::{parse_discount_percent, parse_expiry_date};
use voucher_core::{ImportReport, NewVoucher, VoucherStore, CSV_HEADER};

use crate::cancel::{cancellable, ensure_active};
use crate::error::ServiceResult;

/// Why a single CSV row was not imported.
///
/// The `Display` text is the reason reported back to the uploader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RowFailure {
    #[error("Incomplete data")]
    IncompleteData,

    #[error("Invalid discount percent")]
    InvalidDiscountPercent,

    #[error("Invalid expiry date format")]
    InvalidExpiryDate,

    #[error("Database error or duplicate code")]
    StoreRejected,
}

/// Imports vouchers from CSV, one store write per row.
#[derive(Clone)]
pub struct CsvImporter {
    store: Arc<dyn VoucherStore>,
}

impl CsvImporter {
    pub fn new(store: Arc<dyn VoucherStore>) -> Self {
        CsvImporter { store }
    }

    /// Reads the whole of `input`, then imports its data rows in order.
    ///
    /// ## Errors
    /// * `StreamRead` - the input is not readable CSV (nothing is imported)
    /// * `Cancelled` - the token fired; rows before it stay imported
    pub async fn import(
        &self,
        cancel: &CancellationToken,
        input: impl Read,
    ) -> ServiceResult<ImportReport> {
        ensure_active(cancel)?;

        let mut records = read_records(input)?.into_iter();
        if let Some(header) = records.next() {
            check_header(&header);
        }

        let mut report = ImportReport::default();

        for (index, record) in records.enumerate() {
            ensure_active(cancel)?;
            let row = index + 2;

            match self.import_row(cancel, &record).await? {
                Ok(()) => report.record_success(),
                Err(failure) => {
                    warn!(row, reason = %failure, "CSV row rejected");
                    report.record_failure(row, failure.to_string());
                }
            }
        }

        info!(
            success_count = report.success_count,
            failed_count = report.failed_count,
            "CSV import finished"
        );
        Ok(report)
    }

    /// Validates and stores one row. The outer error is for cancellation only.
    async fn import_row(
        &self,
        cancel: &CancellationToken,
        record: &StringRecord,
    ) -> ServiceResult<Result<(), RowFailure>> {
        let voucher = match parse_row(record) {
            Ok(voucher) => voucher,
            Err(failure) => return Ok(Err(failure)),
        };

        let code = voucher.code.clone();
        match cancellable(cancel, self.store.create(voucher)).await? {
            Ok(_) => Ok(Ok(())),
            Err(e) => {
                warn!(code = %code, error = %e, "Failed to store imported voucher");
                Ok(Err(RowFailure::StoreRejected))
            }
        }
    }
}

/// Parses the entire stream up front so a broken file imports nothing.
fn read_records(input: impl Read) -> ServiceResult<Vec<StringRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let records = reader.records().collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

fn check_header(header: &StringRecord) {
    let matches = header.len() == CSV_HEADER.len()
        && header
            .iter()
            .zip(CSV_HEADER)
            .all(|(actual, expected)| actual.eq_ignore_ascii_case(expected));

    if !matches {
        warn!(
            header = ?header.iter().collect::<Vec<_>>(),
            expected = %CSV_HEADER.join(","),
            "Unexpected CSV header, treating row 1 as header anyway"
        );
    }
}

fn parse_row(record: &StringRecord) -> Result<NewVoucher, RowFailure> {
    let (Some(code), Some(percent), Some(expiry)) = (record.get(0), record.get(1), record.get(2))
    else {
        return Err(RowFailure::IncompleteData);
    };

    let percent = parse_discount_percent(percent).map_err(|_| RowFailure::InvalidDiscountPercent)?;
    let expiry = parse_expiry_date(expiry).map_err(|_| RowFailure::InvalidExpiryDate)?;

    Ok(NewVoucher::new(code, percent, expiry, Utc::now()))
}

// =============================================================================
// Unit Tests
// =============================================================================
