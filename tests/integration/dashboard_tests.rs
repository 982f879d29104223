//! Check-in, check-out and service workflows driven through the dashboard

use rust_decimal::Decimal;
use serde_json::json;

use hotel_desk::{
    error::AppError,
    models::CustomerPayload,
    screens::{DashboardScreen, RoomAction},
};

use crate::support::{stub_dashboard, StubBackend};

async fn loaded_dashboard(stub: &StubBackend) -> DashboardScreen {
    stub_dashboard(stub);
    let app = stub.app();
    app.storage.set_token("t").unwrap();
    let mut board = DashboardScreen::new(app.repository.clone());
    board.load().await.unwrap();
    board
}

#[tokio::test]
async fn test_load_fills_every_collection() {
    let stub = StubBackend::start().await;
    let board = loaded_dashboard(&stub).await;

    assert_eq!(board.rooms.len(), 3);
    assert_eq!(board.bookings.len(), 3);
    assert_eq!(board.room_types.len(), 2);
    assert_eq!(board.customers.len(), 2);
    assert_eq!(board.services.len(), 2);

    let room = board.room(2).unwrap();
    assert_eq!(room.number(), "102");
    assert_eq!(
        DashboardScreen::room_actions(room),
        vec![RoomAction::CheckOut, RoomAction::Services]
    );
    assert_eq!(board.occupant(2).map(|c| c.id), Some(7));
    assert_eq!(
        board.room_type_of(room).map(|t| t.ten_loai_phong.as_str()),
        Some("Phòng đơn")
    );
}

#[tokio::test]
async fn test_check_in_without_customer_issues_no_booking_request() {
    let stub = StubBackend::start().await;
    let mut board = loaded_dashboard(&stub).await;

    board.open_check_in(1).unwrap();
    let result = board.submit_check_in().await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(stub.count("POST", "bookings"), 0);
    assert!(board.check_in.is_some());
}

#[tokio::test]
async fn test_check_in_creates_checked_in_booking_and_refetches() {
    let stub = StubBackend::start().await;
    let mut board = loaded_dashboard(&stub).await;
    stub.on(
        "POST",
        "bookings",
        201,
        json!({ "id": 50, "khach_hang_id": 8, "phong_id": 1, "trang_thai": "đã nhận" }),
    );

    let dialog = board.open_check_in(1).unwrap();
    dialog.note = "  Khách quen  ".to_string();
    board.lookup_customer_by_id_number("123456789").unwrap();
    let booking = board.submit_check_in().await.unwrap();

    assert_eq!(booking.id, 50);
    let sent = stub.last("POST", "bookings").unwrap().body;
    assert_eq!(sent["khach_hang_id"], 8);
    assert_eq!(sent["phong_id"], 1);
    assert_eq!(sent["trang_thai"], "đã nhận");
    assert_eq!(sent["ghi_chu"], "Khách quen");
    assert!(sent.get("thoi_gian_ra").is_none());

    assert!(board.check_in.is_none());
    assert_eq!(stub.count("GET", "rooms"), 2);
    assert_eq!(stub.count("GET", "bookings"), 2);
}

#[tokio::test]
async fn test_check_in_refetch_failure_is_reported_after_booking_exists() {
    let stub = StubBackend::start().await;
    let mut board = loaded_dashboard(&stub).await;
    stub.on(
        "POST",
        "bookings",
        201,
        json!({ "id": 51, "khach_hang_id": 7, "phong_id": 1, "trang_thai": "đã nhận" }),
    )
    .on("GET", "rooms", 500, json!({ "message": "Lỗi máy chủ" }));

    board.open_check_in(1).unwrap();
    board.select_customer(7).unwrap();
    let result = board.submit_check_in().await;

    assert!(result.is_err());
    assert_eq!(stub.count("POST", "bookings"), 1);
    assert!(board.check_in.is_none());
    let notification = board.notification().unwrap();
    assert!(notification.is_error());
    assert_eq!(notification.message, "Lỗi máy chủ");
}

#[tokio::test]
async fn test_create_customer_during_check_in_selects_it() {
    let stub = StubBackend::start().await;
    let mut board = loaded_dashboard(&stub).await;
    stub.on(
        "POST",
        "customers",
        201,
        json!({ "id": 9, "ho_ten": "Lê Văn Cường", "cmnd": "987654321" }),
    );

    board.open_check_in(1).unwrap();
    let customer = board
        .create_customer(CustomerPayload {
            ho_ten: "Lê Văn Cường".to_string(),
            cmnd: Some("987654321".to_string()),
            so_dien_thoai: Some(" ".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(customer.id, 9);
    assert_eq!(board.check_in.as_ref().unwrap().selected_customer_id, Some(9));
    assert_eq!(stub.count("GET", "customers"), 2);
    let sent = stub.last("POST", "customers").unwrap().body;
    assert!(sent.get("so_dien_thoai").is_none());
}

#[tokio::test]
async fn test_invalid_customer_is_not_posted() {
    let stub = StubBackend::start().await;
    let mut board = loaded_dashboard(&stub).await;

    board.open_check_in(1).unwrap();
    let result = board
        .create_customer(CustomerPayload {
            ho_ten: "Khách".to_string(),
            cmnd: Some("12345".to_string()),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(stub.count("POST", "customers"), 0);
}

#[tokio::test]
async fn test_check_out_uses_first_active_booking_and_server_totals() {
    let stub = StubBackend::start().await;
    let mut board = loaded_dashboard(&stub).await;
    stub.on(
        "GET",
        "bookings/5/calculate-price",
        200,
        json!({ "tong_tien_phong": 1000000, "tong_tien_dich_vu": "250000", "tong_tien": 1 }),
    )
    .on(
        "POST",
        "bookings/5/checkout",
        200,
        json!({ "message": "Trả phòng thành công", "hoa_don": { "id": 9, "tong_tien": 1250000 } }),
    );

    let total = board.open_check_out(2).await.unwrap().displayed_total();
    assert_eq!(total, Decimal::from(1_250_000));
    assert_eq!(stub.count("GET", "bookings/3/calculate-price"), 0);

    let result = board.confirm_check_out().await.unwrap();
    assert_eq!(result.invoice.map(|i| i.id), Some(9));
    assert!(board.check_out.is_none());
    assert_eq!(board.notification().unwrap().message, "Trả phòng thành công");
    assert_eq!(stub.count("GET", "rooms"), 2);
    assert_eq!(stub.count("GET", "bookings"), 2);
}

#[tokio::test]
async fn test_failed_checkout_keeps_dialog_open() {
    let stub = StubBackend::start().await;
    let mut board = loaded_dashboard(&stub).await;
    stub.on(
        "GET",
        "bookings/5/calculate-price",
        200,
        json!({ "tong_tien_phong": 0, "tong_tien_dich_vu": 0 }),
    )
    .on(
        "POST",
        "bookings/5/checkout",
        422,
        json!({ "error": "Hóa đơn chưa được tạo" }),
    );

    board.open_check_out(2).await.unwrap();
    let result = board.confirm_check_out().await;

    assert!(result.is_err());
    assert!(board.check_out.is_some());
    assert_eq!(board.notification().unwrap().message, "Hóa đơn chưa được tạo");
    assert_eq!(stub.count("GET", "rooms"), 1);
}

#[tokio::test]
async fn test_service_usage_add_and_remove_refetch_the_booking_list() {
    let stub = StubBackend::start().await;
    let mut board = loaded_dashboard(&stub).await;
    stub.on(
        "GET",
        "booking-services",
        200,
        json!([{ "id": 1, "dat_phong_id": 5, "dich_vu_id": 1, "so_luong": 2, "gia_tien": 20000 }]),
    )
    .on(
        "POST",
        "booking-services",
        201,
        json!({ "id": 2, "dat_phong_id": 5, "dich_vu_id": 2, "so_luong": 1 }),
    )
    .on("DELETE", "booking-services/1", 200, json!({}));

    let dialog = board.open_services(2).await.unwrap();
    assert_eq!(dialog.booking_id, 5);
    assert_eq!(dialog.listed_total(), Decimal::from(20_000));
    assert_eq!(
        stub.last("GET", "booking-services").unwrap().query.as_deref(),
        Some("dat_phong_id=5")
    );

    board.add_service_usage(Some(2), 1, None).await.unwrap();
    let sent = stub.last("POST", "booking-services").unwrap().body;
    assert_eq!(sent, json!({ "dat_phong_id": 5, "dich_vu_id": 2, "so_luong": 1 }));
    assert_eq!(stub.count("GET", "booking-services"), 2);

    board.remove_service_usage(1).await.unwrap();
    assert_eq!(stub.count("DELETE", "booking-services/1"), 1);
    assert_eq!(stub.count("GET", "booking-services"), 3);
}

#[tokio::test]
async fn test_zero_quantity_is_rejected_locally() {
    let stub = StubBackend::start().await;
    let mut board = loaded_dashboard(&stub).await;
    stub.on("GET", "booking-services", 200, json!([]));

    board.open_services(2).await.unwrap();
    let result = board.add_service_usage(Some(1), 0, None).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(stub.count("POST", "booking-services"), 0);
}

#[tokio::test]
async fn test_mark_room_cleaned() {
    let stub = StubBackend::start().await;
    let mut board = loaded_dashboard(&stub).await;
    stub.on(
        "PUT",
        "rooms/3",
        200,
        json!({ "id": 3, "so_phong": "201", "trang_thai": "trống" }),
    );

    board.mark_room_cleaned(3).await.unwrap();

    assert_eq!(
        stub.last("PUT", "rooms/3").unwrap().body,
        json!({ "trang_thai": "trống" })
    );
    assert_eq!(stub.count("GET", "rooms"), 2);

    let refused = board.mark_room_cleaned(1).await;
    assert!(matches!(refused, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_booking_without_status_does_not_break_the_board() {
    let stub = StubBackend::start().await;
    stub_dashboard(&stub);
    stub.on(
        "GET",
        "bookings",
        200,
        json!([
            { "id": 11, "khach_hang_id": 8, "phong_id": 1 },
            { "id": 5, "khach_hang_id": 7, "phong_id": 2, "trang_thai": "Đã nhận" }
        ]),
    )
    .on(
        "GET",
        "booking-services",
        200,
        json!([{ "id": 1, "dat_phong_id": 5, "so_luong": 1 }]),
    );
    let app = stub.app();
    let mut board = DashboardScreen::new(app.repository.clone());

    board.load().await.unwrap();

    assert_eq!(board.bookings.len(), 2);
    assert_eq!(board.active_booking(1).map(|b| b.id), None);
    assert_eq!(board.active_booking(2).map(|b| b.id), Some(5));
    let dialog = board.open_services(2).await.unwrap();
    assert_eq!(dialog.usages[0].dich_vu_id, None);
}
