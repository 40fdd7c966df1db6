//! # Voucher Service
//!
//! The voucher use cases on top of an injected [`VoucherStore`].
//!
//! ## Create / Update Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Create / Update Flow                                 │
//! │                                                                         │
//! │  VoucherRequest                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_request ──── errors ───────────────► Validation              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  (update) get_by_id ── missing ──────────────► NotFound                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  exists_by_code ────── taken ────────────────► Conflict                │
//! │       │   (update: only when the code really changes)                  │
//! │       ▼                                                                 │
//! │  stamp timestamps, store.create / store.update                         │
//! │       │                                                                 │
//! │       ├── ConstraintViolation (lost race) ───► Conflict                │
//! │       ▼                                                                 │
//! │  VoucherResponse                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every store call is raced against the caller's [`CancellationToken`].

use std::sync::Arc;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use voucher_core::validation::{validate_request, VoucherFields};
use voucher_core::{
    NewVoucher, PageMetadata, PageRequest, SortOrder, StoreError, VoucherFilter, VoucherPage,
    VoucherRequest, VoucherResponse, VoucherStore,
};

use crate::cancel::cancellable;
use crate::error::{ServiceError, ServiceResult};

/// Voucher CRUD with code uniqueness and pagination.
///
/// ## Usage
/// ```rust,ignore
/// let service = VoucherService::new(Arc::new(db.vouchers()));
/// let cancel = CancellationToken::new();
///
/// let created = service.create(&cancel, request).await?;
/// let page = service.list(&cancel, PageRequest::default(), "", SortOrder::Asc).await?;
/// ```
#[derive(Clone)]
pub struct VoucherService {
    store: Arc<dyn VoucherStore>,
}

impl VoucherService {
    pub fn new(store: Arc<dyn VoucherStore>) -> Self {
        VoucherService { store }
    }

    /// Creates a voucher.
    ///
    /// ## Errors
    /// * `Validation` - one message per violated field
    /// * `Conflict` - the code is taken, ignoring case
    /// * `Store` / `Cancelled`
    pub async fn create(
        &self,
        cancel: &CancellationToken,
        request: VoucherRequest,
    ) -> ServiceResult<VoucherResponse> {
        let fields = validate(&request)?;

        if cancellable(cancel, self.store.exists_by_code(&fields.code)).await?? {
            warn!(code = %fields.code, "Voucher code already exists");
            return Err(ServiceError::Conflict { code: fields.code });
        }

        let voucher = NewVoucher::new(
            fields.code.clone(),
            fields.discount_percent,
            fields.expiry_date,
            Utc::now(),
        );

        let created = cancellable(cancel, self.store.create(voucher))
            .await?
            .map_err(|e| write_failure(e, &fields.code))?;

        info!(id = %created.id, code = %created.code, "Voucher created");
        Ok(created.into())
    }

    /// Lists one page of vouchers whose code contains `search`, ignoring case.
    ///
    /// A page past the end is an empty page, not an error.
    pub async fn list(
        &self,
        cancel: &CancellationToken,
        page: PageRequest,
        search: &str,
        order: SortOrder,
    ) -> ServiceResult<VoucherPage> {
        let filter = VoucherFilter::new(search, order);

        let (vouchers, total) =
            cancellable(cancel, self.store.list(page.size(), page.offset(), &filter))
                .await?
                .map_err(|e| {
                    error!(error = %e, "Failed to list vouchers");
                    ServiceError::from(e)
                })?;

        let paging = PageMetadata::new(page, total);
        info!(
            page = paging.page,
            size = paging.size,
            total = paging.total_item,
            "Vouchers listed"
        );

        Ok(VoucherPage {
            data: vouchers.into_iter().map(VoucherResponse::from).collect(),
            paging,
        })
    }

    /// Fetches a single voucher.
    pub async fn get(&self, cancel: &CancellationToken, id: &str) -> ServiceResult<VoucherResponse> {
        let voucher = cancellable(cancel, self.store.get_by_id(id))
            .await?
            .map_err(|e| read_failure(e, id))?;

        Ok(voucher.into())
    }

    /// Replaces code, discount and expiry of an existing voucher.
    ///
    /// Keeping the current code (in any letter case) never conflicts with
    /// the voucher itself.
    pub async fn update(
        &self,
        cancel: &CancellationToken,
        id: &str,
        request: VoucherRequest,
    ) -> ServiceResult<VoucherResponse> {
        let fields = validate(&request)?;

        let mut voucher = cancellable(cancel, self.store.get_by_id(id))
            .await?
            .map_err(|e| read_failure(e, id))?;

        if !voucher.has_code(&fields.code)
            && cancellable(cancel, self.store.exists_by_code(&fields.code)).await??
        {
            warn!(id = %id, code = %fields.code, "Voucher code already exists");
            return Err(ServiceError::Conflict { code: fields.code });
        }

        voucher.code = fields.code;
        voucher.discount_percent = fields.discount_percent;
        voucher.expiry_date = fields.expiry_date;
        voucher.updated_at = Utc::now();

        let updated = cancellable(cancel, self.store.update(&voucher))
            .await?
            .map_err(|e| write_failure(e, &voucher.code))?;

        info!(id = %updated.id, code = %updated.code, "Voucher updated");
        Ok(updated.into())
    }

    /// Hard-deletes a voucher. Deleting an unknown id succeeds.
    pub async fn delete(&self, cancel: &CancellationToken, id: &str) -> ServiceResult<()> {
        let removed = cancellable(cancel, self.store.delete(id))
            .await?
            .map_err(|e| {
                error!(id = %id, error = %e, "Failed to delete voucher");
                ServiceError::from(e)
            })?;

        if removed {
            info!(id = %id, "Voucher deleted");
        } else {
            info!(id = %id, "Voucher not found, nothing deleted");
        }
        Ok(())
    }
}

fn validate(request: &VoucherRequest) -> ServiceResult<VoucherFields> {
    validate_request(request).map_err(|errors| {
        warn!(errors = %errors, "Voucher request failed validation");
        ServiceError::Validation(errors)
    })
}

fn read_failure(err: StoreError, id: &str) -> ServiceError {
    match err {
        StoreError::NotFound { .. } => {
            warn!(id = %id, "Voucher not found");
        }
        ref other => {
            error!(id = %id, error = %other, "Failed to load voucher");
        }
    }
    err.into()
}

/// Maps a failed insert/update; a unique index hit means another writer won.
fn write_failure(err: StoreError, code: &str) -> ServiceError {
    match err {
        StoreError::ConstraintViolation(reason) => {
            warn!(code = %code, reason = %reason, "Voucher write rejected by constraint");
            ServiceError::Conflict {
                code: code.to_string(),
            }
        }
        other => {
            error!(code = %code, error = %other, "Failed to save voucher");
            other.into()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
