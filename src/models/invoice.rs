//! Invoice model, produced by the backend on checkout

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator::Validate;

use super::{enums::PaymentStatus, Record};

/// Invoice record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    #[serde(default)]
    pub khach_hang_id: Option<i64>,
    #[serde(default)]
    pub dat_phong_id: Option<i64>,
    #[serde(default)]
    pub tong_tien: Decimal,
    #[serde(default)]
    pub tong_tien_phong: Option<Decimal>,
    #[serde(default)]
    pub tong_tien_dich_vu: Option<Decimal>,
    #[serde(default)]
    pub trang_thai_thanh_toan: Option<PaymentStatus>,
    #[serde(default)]
    pub thoi_gian_tra: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Invoice {
    pub fn is_paid(&self) -> bool {
        self.trang_thai_thanh_toan
            .as_ref()
            .is_some_and(|s| s.kind() == PaymentStatus::Paid)
    }
}

impl Record for Invoice {
    fn id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> String {
        let status = self
            .trang_thai_thanh_toan
            .as_ref()
            .map(|s| s.as_str())
            .unwrap_or_default();
        format!(
            "{} {} {}",
            self.id,
            status,
            self.thoi_gian_tra.as_deref().unwrap_or_default()
        )
    }
}

/// Invoice update request; only the payment status is editable from the console
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct InvoicePayload {
    pub trang_thai_thanh_toan: Option<PaymentStatus>,
}

impl InvoicePayload {
    pub fn status(status: PaymentStatus) -> Self {
        Self {
            trang_thai_thanh_toan: Some(status),
        }
    }
}
