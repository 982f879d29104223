//! Room model

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator::Validate;

use super::{enums::RoomStatus, Record};

/// Room record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    /// Room number, e.g. 101
    #[serde(default)]
    pub so_phong: serde_json::Value,
    #[serde(default)]
    pub so_tang: Option<i32>,
    #[serde(default)]
    pub loai_phong_id: Option<i64>,
    #[serde(default)]
    pub trang_thai: RoomStatus,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Room {
    /// Room number as displayed, whether the backend sends it as a number or a string
    pub fn number(&self) -> String {
        match &self.so_phong {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    pub fn is_vacant(&self) -> bool {
        self.trang_thai.kind() == RoomStatus::Vacant
    }

    pub fn is_occupied(&self) -> bool {
        self.trang_thai.kind() == RoomStatus::Occupied
    }
}

impl Record for Room {
    fn id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.number(), self.trang_thai)
    }
}

/// Create/update room request
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct RoomPayload {
    #[validate(length(min = 1, message = "Vui lòng nhập số phòng"))]
    pub so_phong: Option<String>,
    #[validate(range(min = 0, message = "Tầng không hợp lệ"))]
    pub so_tang: Option<i32>,
    pub loai_phong_id: Option<i64>,
    pub trang_thai: Option<RoomStatus>,
}

impl RoomPayload {
    pub fn status_only(status: RoomStatus) -> Self {
        Self {
            trang_thai: Some(status),
            ..Default::default()
        }
    }
}
