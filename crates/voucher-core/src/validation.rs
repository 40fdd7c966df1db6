//! # Validation Module
//!
//! Input validation for voucher requests and CSV fields.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Adapter (CLI / HTTP)                                         │
//! │  └── Type validation (deserialization, page/size parsing)              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── validate_request: every field, one message per violation          │
//! │  └── parse_* helpers: single CSV fields                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── UNIQUE (code_key), the lowercased code                            │
//! │  └── CHECK (discount_percent > 0 AND discount_percent <= 100)          │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use voucher_core::validation::{validate_code, validate_discount_percent};
//!
//! assert!(validate_code("SAVE10").is_ok());
//! assert!(validate_discount_percent(101).is_err());
//! ```

use chrono::NaiveDate;

use crate::error::{ValidationError, ValidationErrors};
use crate::types::VoucherRequest;
use crate::{EXPIRY_DATE_FORMAT, MAX_CODE_LENGTH, MAX_DISCOUNT_PERCENT, MIN_DISCOUNT_PERCENT};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// The fields of a voucher request after every rule has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoucherFields {
    /// Code with surrounding whitespace removed.
    pub code: String,
    pub discount_percent: i32,
    pub expiry_date: NaiveDate,
}

// =============================================================================
// Request Validation
// =============================================================================

/// Validates a create/update request.
///
/// Every field is checked; the error lists one message per violated field
/// rather than stopping at the first.
///
/// ## Example
/// ```rust
/// use voucher_core::validation::validate_request;
/// use voucher_core::VoucherRequest;
///
/// let errors = validate_request(&VoucherRequest::default()).unwrap_err();
/// assert_eq!(errors.errors().len(), 3);
/// ```
pub fn validate_request(request: &VoucherRequest) -> Result<VoucherFields, ValidationErrors> {
    let mut errors = Vec::new();

    if let Err(e) = validate_code(&request.code) {
        errors.push(e);
    }
    if let Err(e) = validate_discount_percent(request.discount_percent) {
        errors.push(e);
    }
    let expiry_date = match request.expiry_date {
        Some(date) => Some(date),
        None => {
            errors.push(ValidationError::Required {
                field: "expiry_date".to_string(),
            });
            None
        }
    };

    match (ValidationErrors::from_vec(errors), expiry_date) {
        (None, Some(expiry_date)) => Ok(VoucherFields {
            code: request.code.trim().to_string(),
            discount_percent: request.discount_percent,
            expiry_date,
        }),
        (Some(errors), _) => Err(errors),
        // expiry_date is only None when an error was pushed for it
        (None, None) => Err(ValidationError::Required {
            field: "expiry_date".to_string(),
        }
        .into()),
    }
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a voucher code.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_CODE_LENGTH`] characters
pub fn validate_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.chars().count() > MAX_CODE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_CODE_LENGTH,
        });
    }

    Ok(())
}

/// Validates a discount percentage.
///
/// ## Rules
/// - Strictly positive, at most 100: `0` and `101` fail, `1` and `100` pass
pub fn validate_discount_percent(percent: i32) -> ValidationResult<()> {
    if !(MIN_DISCOUNT_PERCENT..=MAX_DISCOUNT_PERCENT).contains(&percent) {
        return Err(ValidationError::OutOfRange {
            field: "discount_percent".to_string(),
            min: i64::from(MIN_DISCOUNT_PERCENT),
            max: i64::from(MAX_DISCOUNT_PERCENT),
        });
    }

    Ok(())
}

// =============================================================================
// Text Parsers (CSV fields, CLI arguments)
// =============================================================================

/// Parses a discount percentage from text and checks its bounds.
pub fn parse_discount_percent(raw: &str) -> ValidationResult<i32> {
    let percent = raw
        .trim()
        .parse::<i32>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "discount_percent".to_string(),
            reason: "must be a whole number".to_string(),
        })?;

    validate_discount_percent(percent)?;
    Ok(percent)
}

/// Parses an expiry date in strict `YYYY-MM-DD` form.
///
/// ## Example
/// ```rust
/// use voucher_core::validation::parse_expiry_date;
///
/// assert!(parse_expiry_date("2025-12-31").is_ok());
/// assert!(parse_expiry_date("2025-2-3").is_err());
/// assert!(parse_expiry_date("31/12/2025").is_err());
/// ```
pub fn parse_expiry_date(raw: &str) -> ValidationResult<NaiveDate> {
    let raw = raw.trim();
    let invalid = || ValidationError::InvalidFormat {
        field: "expiry_date".to_string(),
        reason: "must be YYYY-MM-DD".to_string(),
    };

    // chrono tolerates signs, spaces and unpadded fields; the file format does not
    if !has_date_shape(raw) {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(raw, EXPIRY_DATE_FORMAT).map_err(|_| invalid())
}

/// `DDDD-DD-DD` with ASCII digits only.
fn has_date_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Formats an expiry date the way [`parse_expiry_date`] reads it.
pub fn format_expiry_date(date: NaiveDate) -> String {
    date.format(EXPIRY_DATE_FORMAT).to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn request(code: &str, percent: i32, expiry: Option<(i32, u32, u32)>) -> VoucherRequest {
        VoucherRequest {
            code: code.to_string(),
            discount_percent: percent,
            expiry_date: expiry.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        }
    }

    #[test]
    fn test_validate_code() {
        assert!(validate_code("SAVE10").is_ok());
        assert!(validate_code("summer-sale_2025").is_ok());

        assert!(validate_code("").is_err());
        assert!(validate_code("   ").is_err());
        assert!(validate_code(&"A".repeat(MAX_CODE_LENGTH)).is_ok());
        assert!(validate_code(&"A".repeat(MAX_CODE_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_discount_percent_bounds() {
        assert!(validate_discount_percent(1).is_ok());
        assert!(validate_discount_percent(50).is_ok());
        assert!(validate_discount_percent(100).is_ok());

        assert!(validate_discount_percent(0).is_err());
        assert!(validate_discount_percent(101).is_err());
        assert!(validate_discount_percent(-5).is_err());
    }

    #[test]
    fn test_validate_request_ok_trims_code() {
        let fields = validate_request(&request("  SAVE10 ", 10, Some((2025, 12, 31)))).unwrap();
        assert_eq!(fields.code, "SAVE10");
        assert_eq!(fields.discount_percent, 10);
        assert_eq!(fields.expiry_date, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn test_validate_request_reports_every_field() {
        let errors = validate_request(&request("", 0, None)).unwrap_err();
        let fields: Vec<&str> = errors.errors().iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["code", "discount_percent", "expiry_date"]);
    }

    #[test]
    fn test_validate_request_single_violation() {
        let errors = validate_request(&request("SAVE10", 101, Some((2025, 1, 1)))).unwrap_err();
        assert_eq!(errors.errors().len(), 1);
        assert_eq!(errors.errors()[0].field(), "discount_percent");
    }

    #[test]
    fn test_parse_discount_percent() {
        assert_eq!(parse_discount_percent("15").unwrap(), 15);
        assert_eq!(parse_discount_percent(" 100 ").unwrap(), 100);
        assert!(parse_discount_percent("0").is_err());
        assert!(parse_discount_percent("ten").is_err());
        assert!(parse_discount_percent("12.5").is_err());
    }

    #[test]
    fn test_parse_and_format_expiry_date() {
        let date = parse_expiry_date("2026-03-09").unwrap();
        assert_eq!(format_expiry_date(date), "2026-03-09");

        assert!(parse_expiry_date("2026-02-30").is_err());
        assert!(parse_expiry_date("not-a-date").is_err());
        assert!(parse_expiry_date("").is_err());

        for raw in ["+2025-1-01", "2025- 1-01", "2025-01- 1", "+202-01-01", "2025-01-1 "] {
            assert!(parse_expiry_date(raw).is_err(), "{raw:?} should be rejected");
        }
    }
}
