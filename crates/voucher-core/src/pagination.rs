//! # Pagination
//!
//! Page requests, sort order and the derived page metadata.
//!
//! ## Page Math
//! ```text
//! total = 25, size = 10
//!
//!   page 1: offset  0 → 10 rows   has_previous=false  has_next=true
//!   page 2: offset 10 → 10 rows   has_previous=true   has_next=true
//!   page 3: offset 20 →  5 rows   has_previous=true   has_next=false
//!   page 9: offset 80 →  0 rows   has_previous=true   has_next=false
//!
//!   total_page = ceil(25 / 10) = 3
//! ```
//!
//! An out-of-range page is not an error; it is simply empty.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

// =============================================================================
// Sort Order
// =============================================================================

/// Ordering of list results by creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Oldest first.
    #[default]
    Asc,
    /// Newest first.
    Desc,
}

impl SortOrder {
    /// Parses a caller-supplied order.
    ///
    /// Anything other than `asc`/`desc` (ignoring case and whitespace) falls
    /// back to ascending, so a bad `order` parameter never fails a request.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "desc" => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

// =============================================================================
// Page Request
// =============================================================================

/// A validated page number and page size, both at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Creates a page request, rejecting zero page or size.
    pub fn new(page: u32, size: u32) -> Result<Self, ValidationError> {
        if page == 0 {
            return Err(ValidationError::MustBePositive {
                field: "page".to_string(),
            });
        }
        if size == 0 {
            return Err(ValidationError::MustBePositive {
                field: "size".to_string(),
            });
        }
        Ok(PageRequest { page, size })
    }

    /// Parses raw query parameters, applying the defaults (page 1, size 10)
    /// to absent or blank values.
    ///
    /// ## Example
    /// ```rust
    /// use voucher_core::PageRequest;
    ///
    /// let page = PageRequest::parse(None, Some("25")).unwrap();
    /// assert_eq!((page.page(), page.size()), (1, 25));
    /// assert!(PageRequest::parse(Some("0"), None).is_err());
    /// assert!(PageRequest::parse(Some("abc"), None).is_err());
    /// ```
    pub fn parse(page: Option<&str>, size: Option<&str>) -> Result<Self, ValidationError> {
        let page = parse_positive("page", page, DEFAULT_PAGE)?;
        let size = parse_positive("size", size, DEFAULT_PAGE_SIZE)?;
        PageRequest::new(page, size)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of rows to skip: `(page - 1) * size`.
    pub fn offset(&self) -> u64 {
        (u64::from(self.page) - 1) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn parse_positive(field: &str, raw: Option<&str>, default: u32) -> Result<u32, ValidationError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(default),
        Some(raw) => raw,
    };

    match raw.parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ValidationError::MustBePositive {
            field: field.to_string(),
        }),
    }
}

// =============================================================================
// Page Metadata
// =============================================================================

/// Pagination summary returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PageMetadata {
    pub page: u32,
    pub size: u32,
    /// Rows matching the filter, across all pages.
    pub total_item: i64,
    pub total_page: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PageMetadata {
    /// Derives the metadata for `request` given the filtered row count.
    pub fn new(request: PageRequest, total_item: i64) -> Self {
        let size = i64::from(request.size());
        let page = i64::from(request.page());
        let total_item = total_item.max(0);
        let total_page = (total_item + size - 1) / size;

        PageMetadata {
            page: request.page(),
            size: request.size(),
            total_item,
            total_page,
            has_next: page < total_page,
            has_previous: page > 1,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
