//! Customer (guest) model

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator::Validate;

use super::Record;

/// National ID card: 9 (old CMND) or 12 (CCCD) digits
static ID_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{9}|\d{12})$").unwrap());

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?\d{9,12}$").unwrap());

/// Customer record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    #[serde(default)]
    pub ho_ten: String,
    /// ID card number, used to find returning guests at check-in
    #[serde(default)]
    pub cmnd: Option<String>,
    #[serde(default)]
    pub so_dien_thoai: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub dia_chi: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Customer {
    /// Exact match on the ID number, ignoring surrounding whitespace
    pub fn has_id_number(&self, id_number: &str) -> bool {
        let wanted = id_number.trim();
        !wanted.is_empty()
            && self
                .cmnd
                .as_deref()
                .map(|c| c.trim() == wanted)
                .unwrap_or(false)
    }
}

impl Record for Customer {
    fn id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> String {
        [
            Some(self.ho_ten.as_str()),
            self.cmnd.as_deref(),
            self.so_dien_thoai.as_deref(),
            self.email.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Create/update customer request
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CustomerPayload {
    #[validate(length(min = 1, message = "Vui lòng nhập họ tên"))]
    pub ho_ten: String,
    #[validate(regex(path = *ID_NUMBER_RE, message = "CMND/CCCD phải gồm 9 hoặc 12 chữ số"))]
    pub cmnd: Option<String>,
    #[validate(regex(path = *PHONE_RE, message = "Số điện thoại không hợp lệ"))]
    pub so_dien_thoai: Option<String>,
    #[validate(email(message = "Email không hợp lệ"))]
    pub email: Option<String>,
    pub dia_chi: Option<String>,
}

impl CustomerPayload {
    /// Blank optional fields are sent as absent
    pub fn normalized(mut self) -> Self {
        fn blank_to_none(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }
        self.ho_ten = self.ho_ten.trim().to_string();
        self.cmnd = blank_to_none(self.cmnd);
        self.so_dien_thoai = blank_to_none(self.so_dien_thoai);
        self.email = blank_to_none(self.email);
        self.dia_chi = blank_to_none(self.dia_chi);
        self
    }
}
