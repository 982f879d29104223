//! Service catalog and per-booking service usage

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator::Validate;

use super::Record;

/// Catalog entry (minibar, laundry, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    #[serde(default)]
    pub ten_dich_vu: String,
    #[serde(default)]
    pub gia: Option<Decimal>,
    #[serde(default)]
    pub mo_ta: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Record for Service {
    fn id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> String {
        match &self.mo_ta {
            Some(desc) => format!("{} {}", self.ten_dich_vu, desc),
            None => self.ten_dich_vu.clone(),
        }
    }
}

/// Create/update catalog entry request
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct ServicePayload {
    #[validate(length(min = 1, message = "Vui lòng nhập tên dịch vụ"))]
    pub ten_dich_vu: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub gia: Option<Decimal>,
    pub mo_ta: Option<String>,
}

/// Line item billed against a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceUsage {
    pub id: i64,
    #[serde(default)]
    pub dat_phong_id: Option<i64>,
    #[serde(default)]
    pub dich_vu_id: Option<i64>,
    #[serde(default)]
    pub so_luong: i64,
    #[serde(default)]
    pub ghi_chu: Option<String>,
    /// Line amount computed by the backend
    #[serde(default)]
    pub gia_tien: Option<Decimal>,
    #[serde(default)]
    pub thoi_gian_su_dung: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Add a service line to a booking
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Validate)]
pub struct ServiceUsagePayload {
    pub dat_phong_id: i64,
    pub dich_vu_id: i64,
    #[validate(range(min = 1, message = "Số lượng phải lớn hơn 0"))]
    pub so_luong: i64,
    pub ghi_chu: Option<String>,
}
