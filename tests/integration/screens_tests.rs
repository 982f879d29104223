//! List screens and the revenue report against the stub backend

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;

use hotel_desk::{
    error::AppError,
    models::{CustomerPayload, PaymentStatus, RevenueGrouping, RevenueQuery},
    screens::{
        statistics::NO_REVENUE_DATA, CrudScreen, InvoicesScreen, Severity, StatisticsScreen,
    },
};

use crate::support::StubBackend;

#[tokio::test]
async fn test_customer_create_refetches_and_search_ignores_accents() {
    let stub = StubBackend::start().await;
    stub.on(
        "GET",
        "customers",
        200,
        json!({ "data": [
            { "id": 1, "ho_ten": "Đặng Thị Hoa", "cmnd": "111111111" },
            { "id": 2, "ho_ten": "Phạm Minh", "so_dien_thoai": "0901234567" }
        ]}),
    )
    .on(
        "POST",
        "customers",
        201,
        json!({ "id": 3, "ho_ten": "Võ Thanh" }),
    );
    let app = stub.app();
    let mut screen = CrudScreen::new(app.repository.customers.clone());

    screen.load().await.unwrap();
    screen
        .create(&CustomerPayload {
            ho_ten: "Võ Thanh".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(stub.count("GET", "customers"), 2);
    assert_eq!(screen.items().len(), 2);

    screen.set_search("dang hoa");
    let visible: Vec<i64> = screen.visible().iter().map(|c| c.id).collect();
    assert_eq!(visible, vec![1]);

    screen.set_search("0901");
    assert_eq!(screen.visible().len(), 1);
}

#[tokio::test]
async fn test_server_message_becomes_notification() {
    let stub = StubBackend::start().await;
    stub.on("GET", "customers", 200, json!([]))
        .on(
            "POST",
            "customers",
            422,
            json!({ "message": "CMND đã tồn tại" }),
        );
    let app = stub.app();
    let mut screen = CrudScreen::new(app.repository.customers.clone());

    let result = screen
        .create(&CustomerPayload {
            ho_ten: "Trùng".to_string(),
            cmnd: Some("111111111".to_string()),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(AppError::Request { .. })));
    assert_eq!(screen.notification().unwrap().message, "CMND đã tồn tại");
    assert_eq!(stub.count("GET", "customers"), 0);
}

#[tokio::test]
async fn test_delete_room_type() {
    let stub = StubBackend::start().await;
    stub.on("GET", "room-types", 200, json!([]))
        .on("DELETE", "room-types/4", 204, json!(null));
    let app = stub.app();
    let mut screen = CrudScreen::new(app.repository.room_types.clone());

    screen.delete(4).await.unwrap();

    assert_eq!(stub.count("DELETE", "room-types/4"), 1);
    assert_eq!(stub.count("GET", "room-types"), 1);
}

#[tokio::test]
async fn test_invoice_mark_paid() {
    let stub = StubBackend::start().await;
    stub.on(
        "GET",
        "invoices",
        200,
        json!([
            { "id": 1, "dat_phong_id": 5, "tong_tien": "1250000", "trang_thai_thanh_toan": "chưa thanh toán" }
        ]),
    )
    .on(
        "PUT",
        "invoices/1",
        200,
        json!({ "id": 1, "tong_tien": 1250000, "trang_thai_thanh_toan": "đã thanh toán" }),
    );
    let app = stub.app();
    let mut screen = InvoicesScreen::new(app.repository.invoices.clone());
    screen.load().await.unwrap();
    screen.status_filter = Some(PaymentStatus::Unpaid);
    assert_eq!(screen.totals().unpaid, Decimal::from(1_250_000));

    let invoice = screen.mark_paid(1).await.unwrap();

    assert!(invoice.is_paid());
    assert_eq!(
        stub.last("PUT", "invoices/1").unwrap().body,
        json!({ "trang_thai_thanh_toan": "đã thanh toán" })
    );
    assert_eq!(stub.count("GET", "invoices"), 2);
}

#[tokio::test]
async fn test_revenue_report_query_and_summary() {
    let stub = StubBackend::start().await;
    stub.on(
        "GET",
        "statistics/revenue",
        200,
        json!({
            "tong_doanh_thu": 3000000,
            "chi_tiet": [
                { "thang": "2024-01", "doanh_thu": 1000000, "so_hoa_don": 4 },
                { "thang": "2024-02", "doanh_thu": "2000000", "so_hoa_don": 6 }
            ]
        }),
    );
    let app = stub.app();
    let mut screen = StatisticsScreen::new(
        app.repository.stats.clone(),
        NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
    );
    screen.query = RevenueQuery {
        tu_ngay: NaiveDate::from_ymd_opt(2024, 1, 1),
        den_ngay: NaiveDate::from_ymd_opt(2024, 2, 29),
        kieu: Some(RevenueGrouping::Month),
    };

    let report = screen.load().await.unwrap();
    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.server_total, Some(Decimal::from(3_000_000)));

    let query = stub.last("GET", "statistics/revenue").unwrap().query.unwrap();
    assert_eq!(query, "tu_ngay=2024-01-01&den_ngay=2024-02-29&kieu=thang");

    let summary = screen.summary().unwrap();
    assert_eq!(summary.total, Decimal::from(3_000_000));
    assert_eq!(summary.invoice_count, 10);
    assert_eq!(summary.best_period.map(|(p, _)| p), Some("2024-02".to_string()));
}

#[tokio::test]
async fn test_inverted_date_range_is_not_sent() {
    let stub = StubBackend::start().await;
    let app = stub.app();
    let mut screen = StatisticsScreen::new(
        app.repository.stats.clone(),
        NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
    );
    screen.query.tu_ngay = NaiveDate::from_ymd_opt(2024, 3, 1);
    screen.query.den_ngay = NaiveDate::from_ymd_opt(2024, 2, 1);

    let result = screen.load().await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(screen.notification().unwrap().is_error());
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_revenue_total_beside_wrapped_rows_is_kept() {
    let stub = StubBackend::start().await;
    stub.on(
        "GET",
        "statistics/revenue",
        200,
        json!({
            "data": [{ "thang": "2024-01", "doanh_thu": 1000 }],
            "tong_doanh_thu": 1000
        }),
    );
    let app = stub.app();
    let mut screen = StatisticsScreen::new(
        app.repository.stats.clone(),
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
    );

    let report = screen.load().await.unwrap();

    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.server_total, Some(Decimal::from(1000)));
}

#[tokio::test]
async fn test_empty_revenue_report_shows_info() {
    let stub = StubBackend::start().await;
    stub.on("GET", "statistics/revenue", 200, json!({ "data": [] }));
    let app = stub.app();
    let mut screen = StatisticsScreen::new(
        app.repository.stats.clone(),
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
    );

    screen.load().await.unwrap();

    let notification = screen.notification().unwrap();
    assert_eq!(notification.severity, Severity::Info);
    assert_eq!(notification.message, NO_REVENUE_DATA);
}
