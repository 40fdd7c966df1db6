//! # CSV Export
//!
//! Writes the whole voucher catalog as CSV in the same format the importer
//! reads, so an export can be re-imported as is.
//!
//! ```text
//! store.list_all(search = "", order = asc)
//!      │
//!      ▼
//! voucher_code,discount_percent,expiry_date
//! SAVE10,10,2025-12-31
//! WINTER25,25,2026-01-15
//!      │
//!      ▼
//! Vec<u8>  (offered to the user as vouchers.csv)
//! ```

use std::sync::Arc;

use csv::Writer;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use voucher_core::validation::format_expiry_date;
use voucher_core::{Voucher, VoucherFilter, VoucherStore, CSV_HEADER};

use crate::cancel::cancellable;
use crate::error::{ServiceError, ServiceResult};

/// File name adapters use when offering the export as a download.
pub const EXPORT_FILE_NAME: &str = "vouchers.csv";

/// Exports every voucher, oldest first.
#[derive(Clone)]
pub struct CsvExporter {
    store: Arc<dyn VoucherStore>,
}

impl CsvExporter {
    pub fn new(store: Arc<dyn VoucherStore>) -> Self {
        CsvExporter { store }
    }

    /// Renders the catalog into an in-memory CSV buffer.
    pub async fn export(&self, cancel: &CancellationToken) -> ServiceResult<Vec<u8>> {
        let vouchers = cancellable(cancel, self.store.list_all(&VoucherFilter::default()))
            .await?
            .map_err(|e| {
                error!(error = %e, "Failed to load vouchers for export");
                ServiceError::from(e)
            })?;

        let buffer = write_csv(&vouchers)?;

        info!(count = vouchers.len(), bytes = buffer.len(), "CSV export finished");
        Ok(buffer)
    }
}

fn write_csv(vouchers: &[Voucher]) -> ServiceResult<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());

    writer.write_record(CSV_HEADER).map_err(export_failure)?;

    for voucher in vouchers {
        let percent = voucher.discount_percent.to_string();
        let expiry = format_expiry_date(voucher.expiry_date);
        writer
            .write_record([voucher.code.as_str(), percent.as_str(), expiry.as_str()])
            .map_err(export_failure)?;
    }

    writer
        .into_inner()
        .map_err(|e| export_failure(e.to_string()))
}

fn export_failure(err: impl ToString) -> ServiceError {
    let message = err.to_string();
    error!(error = %message, "Failed to write CSV export");
    ServiceError::Export(message)
}
