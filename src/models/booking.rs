//! Booking model and server-computed price breakdown

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator::Validate;

use super::{enums::BookingStatus, invoice::Invoice, Record};

/// Booking record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub khach_hang_id: Option<i64>,
    pub phong_id: Option<i64>,
    /// Check-in time as sent by the backend
    #[serde(default)]
    pub thoi_gian_vao: Option<String>,
    #[serde(default)]
    pub thoi_gian_ra: Option<String>,
    #[serde(default)]
    pub ghi_chu: Option<String>,
    #[serde(default)]
    pub trang_thai: BookingStatus,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Booking {
    pub fn is_checked_in(&self) -> bool {
        self.trang_thai.kind() == BookingStatus::CheckedIn
    }
}

impl Record for Booking {
    fn id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> String {
        [
            Some(self.trang_thai.as_str()),
            self.ghi_chu.as_deref(),
            self.thoi_gian_vao.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Create/update booking request
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Validate)]
pub struct BookingPayload {
    pub khach_hang_id: i64,
    pub phong_id: i64,
    #[validate(length(min = 1, message = "Vui lòng chọn thời gian nhận phòng"))]
    pub thoi_gian_vao: String,
    pub thoi_gian_ra: Option<String>,
    pub ghi_chu: Option<String>,
    pub trang_thai: BookingStatus,
}

/// Charges computed by the backend for a booking about to be checked out.
/// The console displays these figures and never recomputes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    #[serde(default)]
    pub tong_tien_phong: Decimal,
    #[serde(default)]
    pub tong_tien_dich_vu: Decimal,
    /// Grand total if the backend sends one
    #[serde(default)]
    pub tong_tien: Option<Decimal>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PriceBreakdown {
    /// Total shown in the checkout dialog: room charges plus service charges
    pub fn displayed_total(&self) -> Decimal {
        self.tong_tien_phong + self.tong_tien_dich_vu
    }
}

/// Response of the checkout action; the backend generates the invoice as part of it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutResult {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, alias = "hoa_don", alias = "data")]
    pub invoice: Option<Invoice>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
