//! # Commands
//!
//! One function per subcommand. Each calls the service and wraps the result
//! in the same `WebResponse` envelope the admin API answers with.
//!
//! ```text
//! voucher list --page 2 --size 5
//!      │
//!      ▼
//! PageRequest::parse / SortOrder::parse
//!      │
//!      ▼
//! VoucherService::list(&cancel, ...)
//!      │
//!      ▼
//! { "message": "Vouchers retrieved successfully.", "data": [...], "paging": {...} }
//! ```

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use voucher_core::{PageRequest, SortOrder, VoucherStore, WebResponse};
use tokio_util::sync::CancellationToken;
use voucher_service::{CsvExporter, CsvImporter, VoucherService};

use crate::cli::{Command, ListArgs};
use crate::error::{ApiError, ErrorCode};

/// What a command prints on success.
#[derive(Debug)]
pub enum Output {
    /// JSON envelope for stdout
    Json(Value),

    /// Raw CSV bytes for stdout
    Csv(Vec<u8>),
}

/// The service objects every command needs.
pub struct App {
    service: VoucherService,
    importer: CsvImporter,
    exporter: CsvExporter,
}

impl App {
    pub fn new(store: Arc<dyn VoucherStore>) -> Self {
        App {
            service: VoucherService::new(store.clone()),
            importer: CsvImporter::new(store.clone()),
            exporter: CsvExporter::new(store),
        }
    }
}

/// Runs one subcommand to completion or cancellation.
pub async fn run(
    app: &App,
    command: Command,
    cancel: &CancellationToken,
) -> Result<Output, ApiError> {
    debug!(?command, "Running command");

    match command {
        Command::Create(args) => {
            let voucher = app.service.create(cancel, args.into()).await?;
            envelope(WebResponse::new("Voucher created successfully", voucher))
        }

        Command::List(args) => list(app, args, cancel).await,

        Command::Get { id } => {
            let voucher = app.service.get(cancel, &id).await?;
            envelope(WebResponse::new("Voucher retrieved successfully", voucher))
        }

        Command::Update { id, fields } => {
            let voucher = app.service.update(cancel, &id, fields.into()).await?;
            envelope(WebResponse::new("Voucher updated successfully", voucher))
        }

        Command::Delete { id } => {
            app.service.delete(cancel, &id).await?;
            envelope(WebResponse::<()>::empty("Voucher deleted successfully"))
        }

        Command::Import { file } => {
            let input = open_csv(&file)?;
            let report = app.importer.import(cancel, input).await?;
            envelope(WebResponse::new("CSV import completed.", report))
        }

        Command::Export { output } => {
            let csv = app.exporter.export(cancel).await?;
            match output {
                None => Ok(Output::Csv(csv)),
                Some(path) => {
                    std::fs::write(&path, &csv).map_err(|e| {
                        ApiError::new(
                            ErrorCode::FileError,
                            format!("Failed to write {}: {}", path.display(), e),
                        )
                    })?;
                    info!(path = %path.display(), bytes = csv.len(), "Export written");
                    envelope(WebResponse::new(
                        "Vouchers exported successfully.",
                        path.display().to_string(),
                    ))
                }
            }
        }
    }
}

async fn list(app: &App, args: ListArgs, cancel: &CancellationToken) -> Result<Output, ApiError> {
    let page = PageRequest::parse(args.page.as_deref(), args.size.as_deref())
        .map_err(|e| ApiError::validation(e.to_string()))?;
    let order = SortOrder::parse(&args.order);

    let result = app.service.list(cancel, page, &args.search, order).await?;

    envelope(
        WebResponse::new("Vouchers retrieved successfully.", result.data)
            .with_paging(result.paging),
    )
}

fn open_csv(path: &Path) -> Result<File, ApiError> {
    File::open(path).map_err(|e| {
        ApiError::new(
            ErrorCode::FileError,
            format!("CSV file is required: {}: {}", path.display(), e),
        )
    })
}

fn envelope<T: Serialize>(response: WebResponse<T>) -> Result<Output, ApiError> {
    serde_json::to_value(&response)
        .map(Output::Json)
        .map_err(|e| ApiError::internal(format!("Failed to encode response: {}", e)))
}

// =============================================================================
// Unit Tests
// =============================================================================
