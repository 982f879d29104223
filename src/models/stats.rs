//! Revenue statistics query and report

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Bucket size of the revenue report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevenueGrouping {
    #[serde(rename = "ngay")]
    Day,
    #[default]
    #[serde(rename = "thang")]
    Month,
    #[serde(rename = "nam")]
    Year,
}

impl std::str::FromStr for RevenueGrouping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" | "ngay" => Ok(RevenueGrouping::Day),
            "month" | "thang" => Ok(RevenueGrouping::Month),
            "year" | "nam" => Ok(RevenueGrouping::Year),
            _ => Err(format!("Invalid grouping: {}", s)),
        }
    }
}

/// Query parameters for `statistics/revenue`
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RevenueQuery {
    pub tu_ngay: Option<NaiveDate>,
    pub den_ngay: Option<NaiveDate>,
    pub kieu: Option<RevenueGrouping>,
}

impl RevenueQuery {
    /// Reject an inverted date range before asking the backend
    pub fn check_range(&self) -> Result<(), String> {
        match (self.tu_ngay, self.den_ngay) {
            (Some(from), Some(to)) if from > to => {
                Err("Ngày bắt đầu phải trước ngày kết thúc".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// One bucket of the revenue report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueRow {
    /// Bucket label as sent by the backend (date, month or year)
    #[serde(alias = "ngay", alias = "thang", alias = "nam", alias = "period")]
    pub thoi_gian: String,
    #[serde(default)]
    pub doanh_thu: Decimal,
    #[serde(default)]
    pub tien_phong: Option<Decimal>,
    #[serde(default)]
    pub tien_dich_vu: Option<Decimal>,
    #[serde(default)]
    pub so_hoa_don: Option<i64>,
}

/// Report body; the backend may send the rows bare or wrapped with totals
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RevenueResponse {
    Wrapped {
        #[serde(alias = "data")]
        chi_tiet: Vec<RevenueRow>,
        #[serde(default)]
        tong_doanh_thu: Option<Decimal>,
    },
    Rows(Vec<RevenueRow>),
}

/// Revenue report as displayed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevenueReport {
    pub rows: Vec<RevenueRow>,
    /// Server-side grand total, when provided
    pub server_total: Option<Decimal>,
}

impl From<RevenueResponse> for RevenueReport {
    fn from(response: RevenueResponse) -> Self {
        match response {
            RevenueResponse::Wrapped {
                chi_tiet,
                tong_doanh_thu,
            } => RevenueReport {
                rows: chi_tiet,
                server_total: tong_doanh_thu,
            },
            RevenueResponse::Rows(rows) => RevenueReport {
                rows,
                server_total: None,
            },
        }
    }
}
