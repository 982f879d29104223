//! Room type (pricing tiers) model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator::Validate;

use super::Record;

/// Room type record. Prices are displayed only, never computed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomType {
    pub id: i64,
    #[serde(default)]
    pub ten_loai_phong: String,
    /// Overnight rate
    #[serde(default)]
    pub gia_qua_dem: Option<Decimal>,
    /// First-hour rate
    #[serde(default)]
    pub gia_gio_dau: Option<Decimal>,
    /// Each following hour
    #[serde(default)]
    pub gia_theo_gio: Option<Decimal>,
    /// Full-day rate
    #[serde(default)]
    pub gia_qua_ngay: Option<Decimal>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Record for RoomType {
    fn id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> String {
        self.ten_loai_phong.clone()
    }
}

/// Create/update room type request
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct RoomTypePayload {
    #[validate(length(min = 1, message = "Vui lòng nhập tên loại phòng"))]
    pub ten_loai_phong: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub gia_qua_dem: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub gia_gio_dau: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub gia_theo_gio: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub gia_qua_ngay: Option<Decimal>,
}
