//! Front-desk dashboard: room board plus the check-in, check-out and
//! service dialogs.
//!
//! Every action is a short sequence of independent HTTP calls followed by a
//! refetch. Nothing is atomic across calls: when a mutation succeeds but the
//! refetch fails, the error is notified and local state stays stale until
//! the next refresh.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        Booking, BookingPayload, BookingStatus, CheckoutResult, Customer, CustomerPayload,
        PriceBreakdown, Room, RoomStatus, RoomType, Service, ServiceUsage, ServiceUsagePayload,
    },
    repository::Repository,
};

use super::Notification;

const NO_CUSTOMER_SELECTED: &str = "Vui lòng chọn khách hàng";
const NO_SERVICE_SELECTED: &str = "Vui lòng chọn dịch vụ";
const NO_ACTIVE_BOOKING: &str = "Không tìm thấy đặt phòng đang hoạt động cho phòng này";
const CUSTOMER_NOT_FOUND: &str = "Không tìm thấy khách hàng với số CMND/CCCD này";

/// Booking currently occupying `room_id`: the first checked-in booking for
/// that room, in the order the backend listed them.
pub fn find_active_booking_id(bookings: &[Booking], room_id: i64) -> Option<i64> {
    bookings
        .iter()
        .find(|b| b.phong_id == Some(room_id) && b.is_checked_in())
        .map(|b| b.id)
}

/// Action offered on a room card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomAction {
    CheckIn,
    CheckOut,
    Services,
    MarkCleaned,
}

/// Room counts per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Occupancy {
    pub vacant: usize,
    pub occupied: usize,
    pub cleaning: usize,
    pub other: usize,
}

impl Occupancy {
    pub fn total(&self) -> usize {
        self.vacant + self.occupied + self.cleaning + self.other
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckInDialog {
    pub room_id: i64,
    pub selected_customer_id: Option<i64>,
    pub check_in_time: String,
    pub expected_check_out: Option<String>,
    pub note: String,
    /// Inline message shown in the dialog
    pub validation_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutDialog {
    pub room_id: i64,
    pub booking_id: i64,
    pub breakdown: PriceBreakdown,
}

impl CheckOutDialog {
    pub fn displayed_total(&self) -> Decimal {
        self.breakdown.displayed_total()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDialog {
    pub room_id: i64,
    pub booking_id: i64,
    pub usages: Vec<ServiceUsage>,
    pub validation_error: Option<String>,
}

impl ServiceDialog {
    /// Sum of the line amounts returned by the backend
    pub fn listed_total(&self) -> Decimal {
        self.usages.iter().filter_map(|u| u.gia_tien).sum()
    }
}

pub struct DashboardScreen {
    repository: Repository,
    pub rooms: Vec<Room>,
    pub bookings: Vec<Booking>,
    pub room_types: Vec<RoomType>,
    pub customers: Vec<Customer>,
    pub services: Vec<Service>,
    pub loading: bool,
    pub check_in: Option<CheckInDialog>,
    pub check_out: Option<CheckOutDialog>,
    pub service_dialog: Option<ServiceDialog>,
    notification: Option<Notification>,
}

impl DashboardScreen {
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            rooms: Vec::new(),
            bookings: Vec::new(),
            room_types: Vec::new(),
            customers: Vec::new(),
            services: Vec::new(),
            loading: false,
            check_in: None,
            check_out: None,
            service_dialog: None,
            notification: None,
        }
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn take_notification(&mut self) -> Option<Notification> {
        self.notification.take()
    }

    fn fail(&mut self, action: &str, err: AppError) -> AppError {
        tracing::error!("{} failed: {}", action, err);
        self.notification = Some(Notification::from(&err));
        err
    }

    fn succeed(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification::success(message));
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    /// Fetch everything the board shows
    pub async fn load(&mut self) -> AppResult<()> {
        self.loading = true;
        let result = self.load_all().await;
        self.loading = false;
        result.map_err(|e| self.fail("Loading dashboard", e))
    }

    async fn load_all(&mut self) -> AppResult<()> {
        self.rooms = self.repository.rooms.list().await?;
        self.bookings = self.repository.bookings.list().await?;
        self.room_types = self.repository.room_types.list().await?;
        self.customers = self.repository.customers.list().await?;
        self.services = self.repository.services.list().await?;
        tracing::debug!(
            "Dashboard loaded: {} rooms, {} bookings",
            self.rooms.len(),
            self.bookings.len()
        );
        Ok(())
    }

    /// Refetch rooms and bookings after a mutation
    pub async fn refresh(&mut self) -> AppResult<()> {
        let result: AppResult<()> = async {
            self.rooms = self.repository.rooms.list().await?;
            self.bookings = self.repository.bookings.list().await?;
            Ok(())
        }
        .await;
        result.map_err(|e| self.fail("Refreshing rooms", e))
    }

    // -----------------------------------------------------------------------
    // Room board
    // -----------------------------------------------------------------------

    pub fn room(&self, room_id: i64) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == room_id)
    }

    pub fn room_type_of(&self, room: &Room) -> Option<&RoomType> {
        let type_id = room.loai_phong_id?;
        self.room_types.iter().find(|t| t.id == type_id)
    }

    pub fn customer(&self, customer_id: i64) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == customer_id)
    }

    pub fn service(&self, service_id: i64) -> Option<&Service> {
        self.services.iter().find(|s| s.id == service_id)
    }

    pub fn active_booking(&self, room_id: i64) -> Option<&Booking> {
        let id = find_active_booking_id(&self.bookings, room_id)?;
        self.bookings.iter().find(|b| b.id == id)
    }

    /// Guest currently staying in the room, if the booking names one
    pub fn occupant(&self, room_id: i64) -> Option<&Customer> {
        let customer_id = self.active_booking(room_id)?.khach_hang_id?;
        self.customer(customer_id)
    }

    pub fn room_actions(room: &Room) -> Vec<RoomAction> {
        match room.trang_thai.kind() {
            RoomStatus::Vacant => vec![RoomAction::CheckIn],
            RoomStatus::Occupied => vec![RoomAction::CheckOut, RoomAction::Services],
            RoomStatus::Cleaning => vec![RoomAction::MarkCleaned],
            RoomStatus::Other(_) => Vec::new(),
        }
    }

    pub fn occupancy(&self) -> Occupancy {
        self.rooms
            .iter()
            .fold(Occupancy::default(), |mut acc, room| {
                match room.trang_thai.kind() {
                    RoomStatus::Vacant => acc.vacant += 1,
                    RoomStatus::Occupied => acc.occupied += 1,
                    RoomStatus::Cleaning => acc.cleaning += 1,
                    RoomStatus::Other(_) => acc.other += 1,
                }
                acc
            })
    }

    /// Rooms grouped by floor, floors ascending; rooms without a floor go under 0
    pub fn rooms_by_floor(&self) -> BTreeMap<i32, Vec<&Room>> {
        let mut floors: BTreeMap<i32, Vec<&Room>> = BTreeMap::new();
        for room in &self.rooms {
            floors.entry(room.so_tang.unwrap_or(0)).or_default().push(room);
        }
        floors
    }

    /// "đang dọn" → "trống"
    pub async fn mark_room_cleaned(&mut self, room_id: i64) -> AppResult<()> {
        match self.room(room_id).map(|r| r.trang_thai.kind()) {
            Some(RoomStatus::Cleaning) => {}
            Some(status) => {
                let err = AppError::Validation(format!("Phòng đang ở trạng thái '{}'", status));
                return Err(self.fail("Marking room cleaned", err));
            }
            None => {
                let err = AppError::NotFound("Không tìm thấy phòng".to_string());
                return Err(self.fail("Marking room cleaned", err));
            }
        }

        if let Err(e) = self
            .repository
            .rooms
            .set_status(room_id, RoomStatus::Vacant)
            .await
        {
            return Err(self.fail("Marking room cleaned", e));
        }
        self.succeed("Đã cập nhật trạng thái phòng");
        self.rooms = match self.repository.rooms.list().await {
            Ok(rooms) => rooms,
            Err(e) => return Err(self.fail("Refreshing rooms", e)),
        };
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Check-in
    // -----------------------------------------------------------------------

    pub fn open_check_in(&mut self, room_id: i64) -> AppResult<&mut CheckInDialog> {
        match self.room(room_id).map(|r| r.is_vacant()) {
            Some(true) => {}
            Some(false) => {
                let err = AppError::Validation("Phòng không còn trống".to_string());
                return Err(self.fail("Opening check-in", err));
            }
            None => {
                let err = AppError::NotFound("Không tìm thấy phòng".to_string());
                return Err(self.fail("Opening check-in", err));
            }
        }

        let now = chrono::Local::now().format("%Y-%m-%dT%H:%M").to_string();
        Ok(self.check_in.insert(CheckInDialog {
            room_id,
            selected_customer_id: None,
            check_in_time: now,
            expected_check_out: None,
            note: String::new(),
            validation_error: None,
        }))
    }

    pub fn close_check_in(&mut self) {
        self.check_in = None;
    }

    /// Scan the loaded customers for an exact ID-number match and select it
    pub fn lookup_customer_by_id_number(&mut self, id_number: &str) -> Option<Customer> {
        let found = self
            .customers
            .iter()
            .find(|c| c.has_id_number(id_number))
            .cloned();

        if let Some(dialog) = self.check_in.as_mut() {
            match &found {
                Some(customer) => {
                    dialog.selected_customer_id = Some(customer.id);
                    dialog.validation_error = None;
                }
                None => {
                    dialog.selected_customer_id = None;
                    dialog.validation_error = Some(CUSTOMER_NOT_FOUND.to_string());
                }
            }
        }
        found
    }

    pub fn select_customer(&mut self, customer_id: i64) -> AppResult<()> {
        if self.customer(customer_id).is_none() {
            return Err(AppError::NotFound("Không tìm thấy khách hàng".to_string()));
        }
        let dialog = self
            .check_in
            .as_mut()
            .ok_or_else(|| AppError::Validation("Chưa mở hộp thoại nhận phòng".to_string()))?;
        dialog.selected_customer_id = Some(customer_id);
        dialog.validation_error = None;
        Ok(())
    }

    /// Create a walk-in guest, refetch the customer list and select the new record
    pub async fn create_customer(&mut self, payload: CustomerPayload) -> AppResult<Customer> {
        let payload = payload.normalized();
        if let Err(errors) = payload.validate() {
            let err = AppError::from(errors);
            if let Some(dialog) = self.check_in.as_mut() {
                dialog.validation_error = Some(err.user_message());
            }
            return Err(self.fail("Creating customer", err));
        }

        let customer = match self.repository.customers.create(&payload).await {
            Ok(customer) => customer,
            Err(e) => return Err(self.fail("Creating customer", e)),
        };
        tracing::info!("Created customer {}", customer.id);

        if let Some(dialog) = self.check_in.as_mut() {
            dialog.selected_customer_id = Some(customer.id);
            dialog.validation_error = None;
        }
        self.succeed("Đã thêm khách hàng");

        match self.repository.customers.list().await {
            Ok(customers) => self.customers = customers,
            Err(e) => return Err(self.fail("Refreshing customers", e)),
        }
        Ok(customer)
    }

    /// Create the booking for the open dialog. Without a selected customer
    /// this stops at the inline message and sends nothing.
    pub async fn submit_check_in(&mut self) -> AppResult<Booking> {
        let Some(dialog) = self.check_in.as_mut() else {
            return Err(AppError::Validation(
                "Chưa mở hộp thoại nhận phòng".to_string(),
            ));
        };
        let Some(customer_id) = dialog.selected_customer_id else {
            dialog.validation_error = Some(NO_CUSTOMER_SELECTED.to_string());
            return Err(AppError::Validation(NO_CUSTOMER_SELECTED.to_string()));
        };

        let note = dialog.note.trim();
        let payload = BookingPayload {
            khach_hang_id: customer_id,
            phong_id: dialog.room_id,
            thoi_gian_vao: dialog.check_in_time.clone(),
            thoi_gian_ra: dialog.expected_check_out.clone().filter(|t| !t.is_empty()),
            ghi_chu: (!note.is_empty()).then(|| note.to_string()),
            trang_thai: BookingStatus::CheckedIn,
        };
        if let Err(errors) = payload.validate() {
            let err = AppError::from(errors);
            dialog.validation_error = Some(err.user_message());
            return Err(err);
        }

        let booking = match self.repository.bookings.create(&payload).await {
            Ok(booking) => booking,
            Err(e) => return Err(self.fail("Check-in", e)),
        };
        tracing::info!(
            "Checked in customer {} to room {} (booking {})",
            customer_id,
            payload.phong_id,
            booking.id
        );

        self.check_in = None;
        self.succeed("Nhận phòng thành công");
        self.refresh().await?;
        Ok(booking)
    }

    // -----------------------------------------------------------------------
    // Check-out
    // -----------------------------------------------------------------------

    /// Locate the room's active booking and fetch the server-computed charges
    pub async fn open_check_out(&mut self, room_id: i64) -> AppResult<&CheckOutDialog> {
        let Some(booking_id) = find_active_booking_id(&self.bookings, room_id) else {
            let err = AppError::NotFound(NO_ACTIVE_BOOKING.to_string());
            return Err(self.fail("Opening check-out", err));
        };

        let breakdown = match self.repository.bookings.calculate_price(booking_id).await {
            Ok(breakdown) => breakdown,
            Err(e) => return Err(self.fail("Calculating price", e)),
        };

        Ok(&*self.check_out.insert(CheckOutDialog {
            room_id,
            booking_id,
            breakdown,
        }))
    }

    pub fn close_check_out(&mut self) {
        self.check_out = None;
    }

    pub async fn confirm_check_out(&mut self) -> AppResult<CheckoutResult> {
        let Some(booking_id) = self.check_out.as_ref().map(|d| d.booking_id) else {
            return Err(AppError::Validation("Chưa mở hộp thoại trả phòng".to_string()));
        };

        let result = match self.repository.bookings.checkout(booking_id).await {
            Ok(result) => result,
            Err(e) => return Err(self.fail("Check-out", e)),
        };
        tracing::info!("Checked out booking {}", booking_id);

        self.check_out = None;
        let message = result
            .message
            .clone()
            .unwrap_or_else(|| "Trả phòng thành công".to_string());
        self.succeed(message);
        self.refresh().await?;
        Ok(result)
    }

    // -----------------------------------------------------------------------
    // Services
    // -----------------------------------------------------------------------

    pub async fn open_services(&mut self, room_id: i64) -> AppResult<&ServiceDialog> {
        let Some(booking_id) = find_active_booking_id(&self.bookings, room_id) else {
            let err = AppError::NotFound(NO_ACTIVE_BOOKING.to_string());
            return Err(self.fail("Opening services", err));
        };

        let usages = match self
            .repository
            .service_usages
            .list_for_booking(booking_id)
            .await
        {
            Ok(usages) => usages,
            Err(e) => return Err(self.fail("Loading service usages", e)),
        };

        Ok(&*self.service_dialog.insert(ServiceDialog {
            room_id,
            booking_id,
            usages,
            validation_error: None,
        }))
    }

    pub fn close_services(&mut self) {
        self.service_dialog = None;
    }

    async fn reload_usages(&mut self, booking_id: i64) -> AppResult<()> {
        let usages = match self
            .repository
            .service_usages
            .list_for_booking(booking_id)
            .await
        {
            Ok(usages) => usages,
            Err(e) => return Err(self.fail("Loading service usages", e)),
        };
        if let Some(dialog) = self.service_dialog.as_mut() {
            dialog.usages = usages;
        }
        Ok(())
    }

    pub async fn add_service_usage(
        &mut self,
        service_id: Option<i64>,
        quantity: i64,
        note: Option<String>,
    ) -> AppResult<ServiceUsage> {
        let Some(dialog) = self.service_dialog.as_mut() else {
            return Err(AppError::Validation("Chưa mở hộp thoại dịch vụ".to_string()));
        };
        let Some(service_id) = service_id else {
            dialog.validation_error = Some(NO_SERVICE_SELECTED.to_string());
            return Err(AppError::Validation(NO_SERVICE_SELECTED.to_string()));
        };

        let payload = ServiceUsagePayload {
            dat_phong_id: dialog.booking_id,
            dich_vu_id: service_id,
            so_luong: quantity,
            ghi_chu: note.filter(|n| !n.trim().is_empty()),
        };
        if let Err(errors) = payload.validate() {
            let err = AppError::from(errors);
            dialog.validation_error = Some(err.user_message());
            return Err(err);
        }
        dialog.validation_error = None;

        let usage = match self.repository.service_usages.create(&payload).await {
            Ok(usage) => usage,
            Err(e) => return Err(self.fail("Adding service", e)),
        };
        tracing::info!(
            "Added service {} x{} to booking {}",
            service_id,
            quantity,
            payload.dat_phong_id
        );
        self.succeed("Đã thêm dịch vụ");
        self.reload_usages(payload.dat_phong_id).await?;
        Ok(usage)
    }

    pub async fn remove_service_usage(&mut self, usage_id: i64) -> AppResult<()> {
        let Some(booking_id) = self.service_dialog.as_ref().map(|d| d.booking_id) else {
            return Err(AppError::Validation("Chưa mở hộp thoại dịch vụ".to_string()));
        };

        if let Err(e) = self.repository.service_usages.delete(usage_id).await {
            return Err(self.fail("Removing service", e));
        }
        tracing::info!("Removed service usage {} from booking {}", usage_id, booking_id);
        self.succeed("Đã xóa dịch vụ");
        self.reload_usages(booking_id).await
    }
}
