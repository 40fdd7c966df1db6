//! # CLI Error Type
//!
//! What a failed command prints, and which exit code it ends with.
//!
//! ```json
//! {
//!   "code": "CONFLICT",
//!   "message": "Voucher code 'SAVE10' already exists"
//! }
//! ```

use serde::Serialize;
use voucher_service::ServiceError;

/// Error printed by a failed command.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for scripts
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes, mirroring the HTTP status an admin API would answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed (400)
    ValidationError,

    /// Resource not found (404)
    NotFound,

    /// Voucher code already taken (409)
    Conflict,

    /// Uploaded/exported file problem (400 on read, 500 on write)
    FileError,

    /// Database operation failed (500)
    DatabaseError,

    /// Interrupted by Ctrl-C
    Cancelled,

    /// Internal error (500)
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self.code {
            ErrorCode::ValidationError | ErrorCode::NotFound | ErrorCode::Conflict => 2,
            ErrorCode::Cancelled => 130,
            ErrorCode::FileError | ErrorCode::DatabaseError | ErrorCode::Internal => 1,
        }
    }
}

/// Converts service errors to CLI errors.
impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => ApiError::validation(errors.to_string()),
            ServiceError::Conflict { .. } => ApiError::new(ErrorCode::Conflict, err.to_string()),
            ServiceError::NotFound { .. } => ApiError::new(ErrorCode::NotFound, err.to_string()),
            ServiceError::Store(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Store operation failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            ServiceError::StreamRead(e) => {
                ApiError::new(ErrorCode::FileError, format!("Failed to process CSV file: {}", e))
            }
            ServiceError::Export(e) => {
                tracing::error!("CSV export failed: {}", e);
                ApiError::new(ErrorCode::FileError, "Failed to export CSV")
            }
            ServiceError::Cancelled => ApiError::new(ErrorCode::Cancelled, "Operation cancelled"),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
