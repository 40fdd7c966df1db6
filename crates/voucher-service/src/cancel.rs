//! Cancellation helpers shared by the service and the CSV pipelines.
//!
//! Every store call goes through [`cancellable`]: the token is checked
//! first, then raced against the call. A call that loses the race is dropped.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::{ServiceError, ServiceResult};

/// Fails with [`ServiceError::Cancelled`] once `cancel` has fired.
pub(crate) fn ensure_active(cancel: &CancellationToken) -> ServiceResult<()> {
    if cancel.is_cancelled() {
        return Err(ServiceError::Cancelled);
    }
    Ok(())
}

/// Runs `fut` unless `cancel` fires first.
///
/// The future's own output is returned untouched so callers can map store
/// errors in context.
pub(crate) async fn cancellable<F>(cancel: &CancellationToken, fut: F) -> ServiceResult<F::Output>
where
    F: Future,
{
    ensure_active(cancel)?;

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ServiceError::Cancelled),
        output = fut => Ok(output),
    }
}
