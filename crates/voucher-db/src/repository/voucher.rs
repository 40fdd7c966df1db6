//! # Voucher Repository
//!
//! Database operations for vouchers.
//!
//! ## Key Operations
//! - CRUD operations
//! - Code lookup ignoring letter case
//! - Filtered, ordered, paginated listing with a matching count
//!
//! ## Code Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Code Search Works                                │
//! │                                                                         │
//! │  Admin types: "save_1"                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Escape LIKE wildcards:  save\_1  →  pattern  %save\_1%                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ vouchers                                │                           │
//! │  │                                         │                           │
//! │  │ SAVE_10   | 10 | 2025-12-31             │ ← MATCH!                  │
//! │  │ save_15   | 15 | 2025-06-30             │ ← MATCH!                  │
//! │  │ SAVEX10   | 10 | 2025-12-31             │   (_ is literal)          │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ORDER BY created_at, rowid  →  LIMIT / OFFSET                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! SQLite only folds ASCII letters, so both uniqueness and search run against
//! `code_key`, the code lowercased by [`code_key`] before it reaches SQL.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use voucher_core::{
    code_key, NewVoucher, SortOrder, StoreError, Voucher, VoucherFilter, VoucherStore,
};

const SELECT_COLUMNS: &str =
    "SELECT id, code, discount_percent, expiry_date, created_at, updated_at FROM vouchers";

/// Repository for voucher database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = VoucherRepository::new(pool);
///
/// let voucher = repo.create(NewVoucher::new("SAVE10", 10, expiry, Utc::now())).await?;
/// let (page, total) = repo.list(10, 0, &VoucherFilter::default()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct VoucherRepository {
    pool: SqlitePool,
}

impl VoucherRepository {
    /// Creates a new VoucherRepository.
    pub fn new(pool: SqlitePool) -> Self {
        VoucherRepository { pool }
    }

    /// Inserts a new voucher under a freshly generated id.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - the code is taken (ignoring case)
    /// * `DbError::CheckViolation` - code or discount outside the column rules
    pub async fn create(&self, voucher: NewVoucher) -> DbResult<Voucher> {
        let id = Uuid::new_v4().to_string();

        debug!(id = %id, code = %voucher.code, "Inserting voucher");

        sqlx::query(
            r#"
            INSERT INTO vouchers
                (id, code, code_key, discount_percent, expiry_date, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&id)
        .bind(&voucher.code)
        .bind(code_key(&voucher.code))
        .bind(voucher.discount_percent)
        .bind(voucher.expiry_date)
        .bind(voucher.created_at)
        .bind(voucher.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| with_code(e.into(), &voucher.code))?;

        Ok(Voucher {
            id,
            code: voucher.code,
            discount_percent: voucher.discount_percent,
            expiry_date: voucher.expiry_date,
            created_at: voucher.created_at,
            updated_at: voucher.updated_at,
        })
    }

    /// Checks whether any voucher uses `code`, ignoring case.
    pub async fn exists_by_code(&self, code: &str) -> DbResult<bool> {
        let matches: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM vouchers WHERE code_key = ?1")
                .bind(code_key(code))
                .fetch_one(&self.pool)
                .await?;

        Ok(matches > 0)
    }

    /// Gets a voucher by its ID.
    ///
    /// ## Returns
    /// * `Ok(Voucher)` - Voucher found
    /// * `Err(DbError::NotFound)` - No voucher with this id
    pub async fn get_by_id(&self, id: &str) -> DbResult<Voucher> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");

        sqlx::query_as::<_, Voucher>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Voucher", id))
    }

    /// Returns one page of vouchers matching `filter` plus the total number
    /// of matching vouchers.
    ///
    /// Ties on `created_at` are broken by insertion order so that pages never
    /// overlap.
    pub async fn list(
        &self,
        limit: u32,
        offset: u64,
        filter: &VoucherFilter,
    ) -> DbResult<(Vec<Voucher>, i64)> {
        let pattern = search_pattern(&filter.search);

        debug!(
            search = %filter.search,
            order = filter.order.as_str(),
            limit,
            offset,
            "Listing vouchers"
        );

        let total: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM vouchers WHERE code_key LIKE ?1 ESCAPE '\'"#)
                .bind(&pattern)
                .fetch_one(&self.pool)
                .await?;

        let sql = format!(
            r#"{SELECT_COLUMNS} WHERE code_key LIKE ?1 ESCAPE '\' {} LIMIT ?2 OFFSET ?3"#,
            order_clause(filter.order)
        );

        let vouchers = sqlx::query_as::<_, Voucher>(&sql)
            .bind(&pattern)
            .bind(i64::from(limit))
            .bind(i64::try_from(offset).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        debug!(count = vouchers.len(), total, "List returned vouchers");
        Ok((vouchers, total))
    }

    /// Returns every voucher matching `filter`, in the filter's order.
    pub async fn list_all(&self, filter: &VoucherFilter) -> DbResult<Vec<Voucher>> {
        let sql = format!(
            r#"{SELECT_COLUMNS} WHERE code_key LIKE ?1 ESCAPE '\' {}"#,
            order_clause(filter.order)
        );

        let vouchers = sqlx::query_as::<_, Voucher>(&sql)
            .bind(search_pattern(&filter.search))
            .fetch_all(&self.pool)
            .await?;

        debug!(count = vouchers.len(), "Loaded vouchers for export");
        Ok(vouchers)
    }

    /// Writes the mutable fields of `voucher` and returns the stored row.
    ///
    /// `id` and `created_at` are never changed.
    pub async fn update(&self, voucher: &Voucher) -> DbResult<Voucher> {
        debug!(id = %voucher.id, code = %voucher.code, "Updating voucher");

        let result = sqlx::query(
            r#"
            UPDATE vouchers
            SET code = ?1, code_key = ?2, discount_percent = ?3, expiry_date = ?4,
                updated_at = ?5
            WHERE id = ?6
            "#,
        )
        .bind(&voucher.code)
        .bind(code_key(&voucher.code))
        .bind(voucher.discount_percent)
        .bind(voucher.expiry_date)
        .bind(voucher.updated_at)
        .bind(&voucher.id)
        .execute(&self.pool)
        .await
        .map_err(|e| with_code(e.into(), &voucher.code))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Voucher", &voucher.id));
        }

        self.get_by_id(&voucher.id).await
    }

    /// Hard-deletes a voucher. Returns `false` when nothing matched.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM vouchers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(id = %id, removed = result.rows_affected(), "Deleted voucher");
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl VoucherStore for VoucherRepository {
    async fn create(&self, voucher: NewVoucher) -> Result<Voucher, StoreError> {
        Ok(VoucherRepository::create(self, voucher).await?)
    }

    async fn exists_by_code(&self, code: &str) -> Result<bool, StoreError> {
        Ok(VoucherRepository::exists_by_code(self, code).await?)
    }

    async fn get_by_id(&self, id: &str) -> Result<Voucher, StoreError> {
        Ok(VoucherRepository::get_by_id(self, id).await?)
    }

    async fn list(
        &self,
        limit: u32,
        offset: u64,
        filter: &VoucherFilter,
    ) -> Result<(Vec<Voucher>, i64), StoreError> {
        Ok(VoucherRepository::list(self, limit, offset, filter).await?)
    }

    async fn list_all(&self, filter: &VoucherFilter) -> Result<Vec<Voucher>, StoreError> {
        Ok(VoucherRepository::list_all(self, filter).await?)
    }

    async fn update(&self, voucher: &Voucher) -> Result<Voucher, StoreError> {
        Ok(VoucherRepository::update(self, voucher).await?)
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        Ok(VoucherRepository::delete(self, id).await?)
    }
}

// =============================================================================
// Query Helpers
// =============================================================================

fn order_clause(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Asc => "ORDER BY created_at ASC, rowid ASC",
        SortOrder::Desc => "ORDER BY created_at DESC, rowid DESC",
    }
}

/// Builds a `LIKE` pattern matching the folded `search` as a literal
/// substring of `code_key`.
fn search_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in code_key(search).chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Attaches the offending code to a unique violation.
fn with_code(err: DbError, code: &str) -> DbError {
    match err {
        DbError::UniqueViolation { .. } => DbError::duplicate("code", code),
        other => other,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    async fn repo() -> VoucherRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().vouchers()
    }

    fn expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
    }

    /// Builds vouchers whose creation times are one minute apart, in order.
    fn voucher_at(code: &str, minute: i64) -> NewVoucher {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();
        NewVoucher::new(code, 10, expiry(), base + Duration::minutes(minute))
    }

    #[test]
    fn test_search_pattern_escapes_wildcards() {
        assert_eq!(search_pattern(""), "%%");
        assert_eq!(search_pattern("SAVE"), "%save%");
        assert_eq!(search_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(search_pattern("a\\b"), "%a\\\\b%");
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = repo().await;

        let created = repo.create(voucher_at("SAVE10", 0)).await.unwrap();
        assert!(!created.id.is_empty());

        let loaded = repo.get_by_id(&created.id).await.unwrap();
        assert_eq!(loaded, created);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let repo = repo().await;

        let err = repo.get_by_id("missing").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_code_ignores_case() {
        let repo = repo().await;
        repo.create(voucher_at("SAVE10", 0)).await.unwrap();

        let err = repo.create(voucher_at("save10", 1)).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref value, .. } if value == "save10"));

        let store_err: StoreError = err.into();
        assert!(matches!(store_err, StoreError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn test_exists_by_code_ignores_case() {
        let repo = repo().await;
        repo.create(voucher_at("Summer25", 0)).await.unwrap();

        assert!(repo.exists_by_code("SUMMER25").await.unwrap());
        assert!(repo.exists_by_code("summer25").await.unwrap());
        assert!(!repo.exists_by_code("summer").await.unwrap());
    }

    #[tokio::test]
    async fn test_unicode_codes_collide_ignoring_case() {
        let repo = repo().await;
        repo.create(voucher_at("ÜBER10", 0)).await.unwrap();

        assert!(repo.exists_by_code("über10").await.unwrap());
        let err = repo.create(voucher_at("über10", 1)).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref value, .. } if value == "über10"));

        let mut other = repo.create(voucher_at("Über20", 2)).await.unwrap();
        other.code = "üBER10".to_string();
        let err = repo.update(&other).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));

        let filter = VoucherFilter::new("üb", SortOrder::Asc);
        let codes: Vec<_> = repo
            .list_all(&filter)
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.code)
            .collect();
        assert_eq!(codes, ["ÜBER10", "Über20"]);
    }

    #[tokio::test]
    async fn test_check_constraint_rejects_bad_discount() {
        let repo = repo().await;

        let mut voucher = voucher_at("BAD", 0);
        voucher.discount_percent = 0;

        let err = repo.create(voucher).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));
    }

    #[tokio::test]
    async fn test_list_pages_and_counts() {
        let repo = repo().await;
        for i in 0..25 {
            repo.create(voucher_at(&format!("CODE{i:02}"), i)).await.unwrap();
        }

        let filter = VoucherFilter::default();
        let (page, total) = repo.list(10, 20, &filter).await.unwrap();
        assert_eq!(total, 25);
        assert_eq!(page.len(), 5);
        assert_eq!(page[0].code, "CODE20");

        let (page, total) = repo.list(10, 990, &filter).await.unwrap();
        assert_eq!(total, 25);
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_list_orders_by_creation_time() {
        let repo = repo().await;
        repo.create(voucher_at("FIRST", 0)).await.unwrap();
        repo.create(voucher_at("SECOND", 1)).await.unwrap();
        repo.create(voucher_at("THIRD", 2)).await.unwrap();

        let asc = VoucherFilter::new("", SortOrder::Asc);
        let (page, _) = repo.list(10, 0, &asc).await.unwrap();
        let codes: Vec<_> = page.iter().map(|v| v.code.as_str()).collect();
        assert_eq!(codes, ["FIRST", "SECOND", "THIRD"]);

        let desc = VoucherFilter::new("", SortOrder::Desc);
        let all = repo.list_all(&desc).await.unwrap();
        let codes: Vec<_> = all.iter().map(|v| v.code.as_str()).collect();
        assert_eq!(codes, ["THIRD", "SECOND", "FIRST"]);
    }

    #[tokio::test]
    async fn test_same_timestamp_falls_back_to_insertion_order() {
        let repo = repo().await;
        repo.create(voucher_at("A", 0)).await.unwrap();
        repo.create(voucher_at("B", 0)).await.unwrap();

        let (page, _) = repo
            .list(1, 1, &VoucherFilter::new("", SortOrder::Asc))
            .await
            .unwrap();
        assert_eq!(page[0].code, "B");
    }

    #[tokio::test]
    async fn test_search_matches_substring_ignoring_case() {
        let repo = repo().await;
        repo.create(voucher_at("SAVE_10", 0)).await.unwrap();
        repo.create(voucher_at("save_15", 1)).await.unwrap();
        repo.create(voucher_at("SAVEX10", 2)).await.unwrap();
        repo.create(voucher_at("WINTER", 3)).await.unwrap();

        let filter = VoucherFilter::new("Save_1", SortOrder::Asc);
        let (page, total) = repo.list(10, 0, &filter).await.unwrap();
        assert_eq!(total, 2);
        let codes: Vec<_> = page.iter().map(|v| v.code.as_str()).collect();
        assert_eq!(codes, ["SAVE_10", "save_15"]);

        let filter = VoucherFilter::new("save", SortOrder::Asc);
        assert_eq!(repo.list_all(&filter).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_overwrites_mutable_fields() {
        let repo = repo().await;
        let created = repo.create(voucher_at("SAVE10", 0)).await.unwrap();

        let mut changed = created.clone();
        changed.code = "SAVE20".to_string();
        changed.discount_percent = 20;
        changed.updated_at = created.updated_at + Duration::hours(1);

        let updated = repo.update(&changed).await.unwrap();
        assert_eq!(updated.code, "SAVE20");
        assert_eq!(updated.discount_percent, 20);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.updated_at, changed.updated_at);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let repo = repo().await;
        let mut ghost = repo.create(voucher_at("GHOST", 0)).await.unwrap();
        ghost.id = "missing".to_string();

        let err = repo.update(&ghost).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_into_taken_code_is_unique_violation() {
        let repo = repo().await;
        repo.create(voucher_at("SAVE10", 0)).await.unwrap();
        let mut other = repo.create(voucher_at("SAVE20", 1)).await.unwrap();

        other.code = "Save10".to_string();
        let err = repo.update(&other).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_delete_reports_whether_row_existed() {
        let repo = repo().await;
        let created = repo.create(voucher_at("SAVE10", 0)).await.unwrap();

        assert!(repo.delete(&created.id).await.unwrap());
        assert!(!repo.delete(&created.id).await.unwrap());
        assert!(!repo.exists_by_code("SAVE10").await.unwrap());
    }

    #[tokio::test]
    async fn test_store_trait_maps_errors() {
        let repo = repo().await;
        let store: &dyn VoucherStore = &repo;

        let err = store.get_by_id("missing").await.unwrap_err();
        assert_eq!(err, StoreError::not_found("missing"));
    }
}
