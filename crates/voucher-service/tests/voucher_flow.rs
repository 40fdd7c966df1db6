//! End-to-end voucher flows against an in-memory SQLite store.

use std::sync::Arc;

use chrono::NaiveDate;
use voucher_core::{FailedRow, PageRequest, SortOrder, VoucherRequest, VoucherStore};
use voucher_db::{Database, DbConfig};
use tokio_util::sync::CancellationToken;
use voucher_service::{CsvExporter, CsvImporter, ServiceError, VoucherService};

struct Harness {
    store: Arc<dyn VoucherStore>,
    service: VoucherService,
    cancel: CancellationToken,
}

impl Harness {
    async fn new() -> Self {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store: Arc<dyn VoucherStore> = Arc::new(db.vouchers());
        Harness {
            service: VoucherService::new(store.clone()),
            store,
            cancel: CancellationToken::new(),
        }
    }

    fn importer(&self) -> CsvImporter {
        CsvImporter::new(self.store.clone())
    }

    fn exporter(&self) -> CsvExporter {
        CsvExporter::new(self.store.clone())
    }

    async fn seed(&self, count: usize) {
        for i in 0..count {
            self.service
                .create(&self.cancel, request(&format!("CODE{i:02}"), 10))
                .await
                .unwrap();
        }
    }
}

fn request(code: &str, percent: i32) -> VoucherRequest {
    VoucherRequest {
        code: code.to_string(),
        discount_percent: percent,
        expiry_date: NaiveDate::from_ymd_opt(2025, 12, 31),
    }
}

fn page(page: u32, size: u32) -> PageRequest {
    PageRequest::new(page, size).unwrap()
}

#[tokio::test]
async fn create_preserves_case_and_rejects_duplicate_in_other_case() {
    let h = Harness::new().await;

    let first = h.service.create(&h.cancel, request("SAVE10", 10)).await.unwrap();
    assert_eq!(first.code, "SAVE10");

    h.service.create(&h.cancel, request("SAVE20", 20)).await.unwrap();

    let err = h
        .service
        .create(&h.cancel, request("save10", 10))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict { .. }));
}

#[tokio::test]
async fn non_ascii_codes_conflict_ignoring_case() {
    let h = Harness::new().await;
    h.service.create(&h.cancel, request("ÜBER10", 10)).await.unwrap();

    let err = h
        .service
        .create(&h.cancel, request("über10", 10))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict { .. }));

    let other = h.service.create(&h.cancel, request("Über20", 20)).await.unwrap();
    let err = h
        .service
        .update(&h.cancel, &other.id, request("üBER10", 20))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict { .. }));
}

#[tokio::test]
async fn discount_bounds_apply_to_create_and_update() {
    let h = Harness::new().await;

    for percent in [0, 101] {
        let err = h
            .service
            .create(&h.cancel, request("EDGE", percent))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    let low = h.service.create(&h.cancel, request("LOW", 1)).await.unwrap();
    let high = h.service.create(&h.cancel, request("HIGH", 100)).await.unwrap();
    assert_eq!((low.discount_percent, high.discount_percent), (1, 100));

    for percent in [0, 101] {
        let err = h
            .service
            .update(&h.cancel, &low.id, request("LOW", percent))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
    let updated = h
        .service
        .update(&h.cancel, &low.id, request("LOW", 100))
        .await
        .unwrap();
    assert_eq!(updated.discount_percent, 100);
}

#[tokio::test]
async fn paging_over_twenty_five_vouchers() {
    let h = Harness::new().await;
    h.seed(25).await;

    let first = h
        .service
        .list(&h.cancel, page(1, 10), "", SortOrder::Asc)
        .await
        .unwrap();
    assert_eq!(first.data.len(), 10);
    assert_eq!(first.paging.total_item, 25);
    assert_eq!(first.paging.total_page, 3);
    assert!(first.paging.has_next);
    assert!(!first.paging.has_previous);
    assert_eq!(first.data[0].code, "CODE00");

    let last = h
        .service
        .list(&h.cancel, page(3, 10), "", SortOrder::Asc)
        .await
        .unwrap();
    assert_eq!(last.data.len(), 5);
    assert!(!last.paging.has_next);
    assert!(last.paging.has_previous);

    let beyond = h
        .service
        .list(&h.cancel, page(100, 10), "", SortOrder::Asc)
        .await
        .unwrap();
    assert!(beyond.data.is_empty());
    assert!(!beyond.paging.has_next);
    assert_eq!(beyond.paging.total_item, 25);
}

#[tokio::test]
async fn descending_order_and_search() {
    let h = Harness::new().await;
    h.seed(12).await;

    let newest = h
        .service
        .list(&h.cancel, page(1, 3), "", SortOrder::Desc)
        .await
        .unwrap();
    let codes: Vec<_> = newest.data.iter().map(|v| v.code.as_str()).collect();
    assert_eq!(codes, ["CODE11", "CODE10", "CODE09"]);

    let found = h
        .service
        .list(&h.cancel, page(1, 10), "code1", SortOrder::Asc)
        .await
        .unwrap();
    assert_eq!(found.paging.total_item, 3);
    assert_eq!(found.paging.total_page, 1);
}

#[tokio::test]
async fn update_keeping_code_never_conflicts_with_itself() {
    let h = Harness::new().await;
    let created = h.service.create(&h.cancel, request("SAVE10", 10)).await.unwrap();

    let updated = h
        .service
        .update(&h.cancel, &created.id, request("SAVE10", 35))
        .await
        .unwrap();
    assert_eq!(updated.discount_percent, 35);
    assert_eq!(updated.created_at, created.created_at);

    let fetched = h.service.get(&h.cancel, &created.id).await.unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let h = Harness::new().await;
    let created = h.service.create(&h.cancel, request("SAVE10", 10)).await.unwrap();

    h.service.delete(&h.cancel, &created.id).await.unwrap();
    h.service.delete(&h.cancel, &created.id).await.unwrap();

    let err = h.service.get(&h.cancel, &created.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));
}

#[tokio::test]
async fn import_reports_partial_failures() {
    let h = Harness::new().await;
    let csv = "voucher_code,discount_percent,expiry_date\n\
               BAD1,abc,2025-12-31\n\
               BAD2,10,2025/12/31\n\
               GOOD1,15,2025-12-31\n";

    let report = h.importer().import(&h.cancel, csv.as_bytes()).await.unwrap();

    assert_eq!(report.success_count, 1);
    assert_eq!(report.failed_count, 2);
    assert_eq!(
        report.failed_rows,
        vec![
            FailedRow {
                row: 2,
                reason: "Invalid discount percent".to_string()
            },
            FailedRow {
                row: 3,
                reason: "Invalid expiry date format".to_string()
            },
        ]
    );

    let listed = h
        .service
        .list(&h.cancel, PageRequest::default(), "", SortOrder::Asc)
        .await
        .unwrap();
    assert_eq!(listed.data.len(), 1);
    assert_eq!(listed.data[0].code, "GOOD1");
}

#[tokio::test]
async fn import_rejects_codes_already_in_catalog() {
    let h = Harness::new().await;
    h.service.create(&h.cancel, request("SAVE10", 10)).await.unwrap();

    let csv = "voucher_code,discount_percent,expiry_date\nsave10,10,2025-12-31\n";
    let report = h.importer().import(&h.cancel, csv.as_bytes()).await.unwrap();

    assert_eq!(report.success_count, 0);
    assert_eq!(report.failed_rows[0].reason, "Database error or duplicate code");
}

#[tokio::test]
async fn export_then_import_round_trips() {
    let source = Harness::new().await;
    source.service.create(&source.cancel, request("SAVE10", 10)).await.unwrap();
    source.service.create(&source.cancel, request("Half, Off", 50)).await.unwrap();
    source.service.create(&source.cancel, request("FULL", 100)).await.unwrap();

    let csv = source.exporter().export(&source.cancel).await.unwrap();

    let target = Harness::new().await;
    let report = target
        .importer()
        .import(&target.cancel, csv.as_slice())
        .await
        .unwrap();
    assert_eq!(report.success_count, 3);
    assert_eq!(report.failed_count, 0);

    let original = source
        .service
        .list(&source.cancel, PageRequest::default(), "", SortOrder::Asc)
        .await
        .unwrap();
    let imported = target
        .service
        .list(&target.cancel, PageRequest::default(), "", SortOrder::Asc)
        .await
        .unwrap();

    let fields = |page: &voucher_core::VoucherPage| {
        page.data
            .iter()
            .map(|v| (v.code.clone(), v.discount_percent, v.expiry_date))
            .collect::<Vec<_>>()
    };
    assert_eq!(fields(&imported), fields(&original));
}
