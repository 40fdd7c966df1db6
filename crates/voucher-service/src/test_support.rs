//! In-process stores for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use voucher_core::{
    codes_equal, NewVoucher, SortOrder, StoreError, StoreResult, Voucher, VoucherFilter,
    VoucherStore,
};

/// A `VoucherStore` backed by a `Vec`, in insertion order.
#[derive(Default)]
pub(crate) struct MemoryStore {
    vouchers: Mutex<Vec<Voucher>>,
    next_id: Mutex<u64>,
    hide_codes: bool,
}

impl MemoryStore {
    /// Makes `exists_by_code` always answer `false`, so only the unique
    /// check inside `create`/`update` catches duplicates.
    pub(crate) fn hiding_codes(mut self) -> Self {
        self.hide_codes = true;
        self
    }

    pub(crate) fn len(&self) -> usize {
        self.vouchers.lock().unwrap().len()
    }

    pub(crate) fn codes(&self) -> Vec<String> {
        self.vouchers
            .lock()
            .unwrap()
            .iter()
            .map(|v| v.code.clone())
            .collect()
    }

    fn matching(&self, filter: &VoucherFilter) -> Vec<Voucher> {
        let search = filter.search.to_lowercase();
        let mut matching: Vec<Voucher> = self
            .vouchers
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.code.to_lowercase().contains(&search))
            .cloned()
            .collect();

        // stable sort keeps insertion order for equal timestamps
        matching.sort_by_key(|v| v.created_at);
        if filter.order == SortOrder::Desc {
            matching.reverse();
        }
        matching
    }
}

#[async_trait]
impl VoucherStore for MemoryStore {
    async fn create(&self, voucher: NewVoucher) -> StoreResult<Voucher> {
        let mut vouchers = self.vouchers.lock().unwrap();
        if vouchers.iter().any(|v| v.has_code(&voucher.code)) {
            return Err(StoreError::ConstraintViolation(format!(
                "duplicate code {}",
                voucher.code
            )));
        }

        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;

        let created = Voucher {
            id: format!("voucher-{}", *next_id),
            code: voucher.code,
            discount_percent: voucher.discount_percent,
            expiry_date: voucher.expiry_date,
            created_at: voucher.created_at,
            updated_at: voucher.updated_at,
        };
        vouchers.push(created.clone());
        Ok(created)
    }

    async fn exists_by_code(&self, code: &str) -> StoreResult<bool> {
        if self.hide_codes {
            return Ok(false);
        }
        Ok(self.vouchers.lock().unwrap().iter().any(|v| v.has_code(code)))
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Voucher> {
        self.vouchers
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn list(
        &self,
        limit: u32,
        offset: u64,
        filter: &VoucherFilter,
    ) -> StoreResult<(Vec<Voucher>, i64)> {
        let matching = self.matching(filter);
        let total = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn list_all(&self, filter: &VoucherFilter) -> StoreResult<Vec<Voucher>> {
        Ok(self.matching(filter))
    }

    async fn update(&self, voucher: &Voucher) -> StoreResult<Voucher> {
        let mut vouchers = self.vouchers.lock().unwrap();
        if vouchers
            .iter()
            .any(|v| v.id != voucher.id && codes_equal(&v.code, &voucher.code))
        {
            return Err(StoreError::ConstraintViolation(format!(
                "duplicate code {}",
                voucher.code
            )));
        }

        let stored = vouchers
            .iter_mut()
            .find(|v| v.id == voucher.id)
            .ok_or_else(|| StoreError::not_found(&voucher.id))?;
        stored.code = voucher.code.clone();
        stored.discount_percent = voucher.discount_percent;
        stored.expiry_date = voucher.expiry_date;
        stored.updated_at = voucher.updated_at;
        Ok(stored.clone())
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut vouchers = self.vouchers.lock().unwrap();
        let before = vouchers.len();
        vouchers.retain(|v| v.id != id);
        Ok(vouchers.len() < before)
    }
}

/// A store whose every call fails with a backend error.
pub(crate) struct FailingStore;

fn offline() -> StoreError {
    StoreError::Backend("database is locked".to_string())
}

#[async_trait]
impl VoucherStore for FailingStore {
    async fn create(&self, _voucher: NewVoucher) -> StoreResult<Voucher> {
        Err(offline())
    }

    async fn exists_by_code(&self, _code: &str) -> StoreResult<bool> {
        Err(offline())
    }

    async fn get_by_id(&self, _id: &str) -> StoreResult<Voucher> {
        Err(offline())
    }

    async fn list(
        &self,
        _limit: u32,
        _offset: u64,
        _filter: &VoucherFilter,
    ) -> StoreResult<(Vec<Voucher>, i64)> {
        Err(offline())
    }

    async fn list_all(&self, _filter: &VoucherFilter) -> StoreResult<Vec<Voucher>> {
        Err(offline())
    }

    async fn update(&self, _voucher: &Voucher) -> StoreResult<Voucher> {
        Err(offline())
    }

    async fn delete(&self, _id: &str) -> StoreResult<bool> {
        Err(offline())
    }
}

/// A store whose calls never complete.
pub(crate) struct StalledStore;

#[async_trait]
impl VoucherStore for StalledStore {
    async fn create(&self, _voucher: NewVoucher) -> StoreResult<Voucher> {
        std::future::pending().await
    }

    async fn exists_by_code(&self, _code: &str) -> StoreResult<bool> {
        std::future::pending().await
    }

    async fn get_by_id(&self, _id: &str) -> StoreResult<Voucher> {
        std::future::pending().await
    }

    async fn list(
        &self,
        _limit: u32,
        _offset: u64,
        _filter: &VoucherFilter,
    ) -> StoreResult<(Vec<Voucher>, i64)> {
        std::future::pending().await
    }

    async fn list_all(&self, _filter: &VoucherFilter) -> StoreResult<Vec<Voucher>> {
        std::future::pending().await
    }

    async fn update(&self, _voucher: &Voucher) -> StoreResult<Voucher> {
        std::future::pending().await
    }

    async fn delete(&self, _id: &str) -> StoreResult<bool> {
        std::future::pending().await
    }
}
