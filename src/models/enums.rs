//! Status vocabularies shared with the backend
//!
//! The backend stores statuses as free text. Exact canonical values map to
//! variants, anything else is kept verbatim in `Other` so a record is sent
//! back spelled the way it arrived. `kind()` reads a loosely spelled value
//! ("Trống", " đã nhận ") as the status it names.

use serde::{Deserialize, Serialize};

fn normalized(s: &str) -> String {
    s.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// RoomStatus
// ---------------------------------------------------------------------------

/// Room occupancy status
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoomStatus {
    /// "trống"
    Vacant,
    /// "đang sử dụng"
    Occupied,
    /// "đang dọn"
    Cleaning,
    Other(String),
}

impl RoomStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RoomStatus::Vacant => "trống",
            RoomStatus::Occupied => "đang sử dụng",
            RoomStatus::Cleaning => "đang dọn",
            RoomStatus::Other(s) => s.as_str(),
        }
    }

    /// English label for logs and the console
    pub fn label(&self) -> &str {
        match self {
            RoomStatus::Vacant => "vacant",
            RoomStatus::Occupied => "occupied",
            RoomStatus::Cleaning => "cleaning",
            RoomStatus::Other(s) => s.as_str(),
        }
    }
}

impl RoomStatus {
    fn known(s: &str) -> Option<Self> {
        match normalized(s).as_str() {
            "trống" => Some(RoomStatus::Vacant),
            "đang sử dụng" => Some(RoomStatus::Occupied),
            "đang dọn" => Some(RoomStatus::Cleaning),
            _ => None,
        }
    }

    /// The status this value names, ignoring case and padding
    pub fn kind(&self) -> RoomStatus {
        match self {
            RoomStatus::Other(s) => RoomStatus::known(s).unwrap_or_else(|| self.clone()),
            known => known.clone(),
        }
    }
}

impl Default for RoomStatus {
    fn default() -> Self {
        RoomStatus::Vacant
    }
}

impl From<&str> for RoomStatus {
    fn from(s: &str) -> Self {
        match s {
            "trống" => RoomStatus::Vacant,
            "đang sử dụng" => RoomStatus::Occupied,
            "đang dọn" => RoomStatus::Cleaning,
            _ => RoomStatus::Other(s.to_string()),
        }
    }
}

impl From<String> for RoomStatus {
    fn from(s: String) -> Self {
        RoomStatus::from(s.as_str())
    }
}

impl From<RoomStatus> for String {
    fn from(status: RoomStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// BookingStatus
// ---------------------------------------------------------------------------

/// Booking lifecycle status
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    /// "đã nhận", guest is in the room
    CheckedIn,
    /// "đã trả"
    CheckedOut,
    /// "đặt trước"
    Reserved,
    Other(String),
}

impl BookingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BookingStatus::CheckedIn => "đã nhận",
            BookingStatus::CheckedOut => "đã trả",
            BookingStatus::Reserved => "đặt trước",
            BookingStatus::Other(s) => s.as_str(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            BookingStatus::CheckedIn => "checked-in",
            BookingStatus::CheckedOut => "checked-out",
            BookingStatus::Reserved => "reserved",
            BookingStatus::Other(s) => s.as_str(),
        }
    }
}

impl BookingStatus {
    fn known(s: &str) -> Option<Self> {
        match normalized(s).as_str() {
            "đã nhận" => Some(BookingStatus::CheckedIn),
            "đã trả" => Some(BookingStatus::CheckedOut),
            "đặt trước" => Some(BookingStatus::Reserved),
            _ => None,
        }
    }

    pub fn kind(&self) -> BookingStatus {
        match self {
            BookingStatus::Other(s) => BookingStatus::known(s).unwrap_or_else(|| self.clone()),
            known => known.clone(),
        }
    }
}

/// A booking the backend sent without a status
impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Other(String::new())
    }
}

impl From<&str> for BookingStatus {
    fn from(s: &str) -> Self {
        match s {
            "đã nhận" => BookingStatus::CheckedIn,
            "đã trả" => BookingStatus::CheckedOut,
            "đặt trước" => BookingStatus::Reserved,
            _ => BookingStatus::Other(s.to_string()),
        }
    }
}

impl From<String> for BookingStatus {
    fn from(s: String) -> Self {
        BookingStatus::from(s.as_str())
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PaymentStatus
// ---------------------------------------------------------------------------

/// Invoice payment status
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    /// "đã thanh toán"
    Paid,
    /// "chưa thanh toán"
    Unpaid,
    Other(String),
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Paid => "đã thanh toán",
            PaymentStatus::Unpaid => "chưa thanh toán",
            PaymentStatus::Other(s) => s.as_str(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Other(s) => s.as_str(),
        }
    }
}

impl PaymentStatus {
    fn known(s: &str) -> Option<Self> {
        match normalized(s).as_str() {
            "đã thanh toán" | "paid" => Some(PaymentStatus::Paid),
            "chưa thanh toán" | "unpaid" => Some(PaymentStatus::Unpaid),
            _ => None,
        }
    }

    /// The status this value names; also accepts the English labels
    pub fn kind(&self) -> PaymentStatus {
        match self {
            PaymentStatus::Other(s) => PaymentStatus::known(s).unwrap_or_else(|| self.clone()),
            known => known.clone(),
        }
    }
}

impl From<&str> for PaymentStatus {
    fn from(s: &str) -> Self {
        match s {
            "đã thanh toán" => PaymentStatus::Paid,
            "chưa thanh toán" => PaymentStatus::Unpaid,
            _ => PaymentStatus::Other(s.to_string()),
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(s: String) -> Self {
        PaymentStatus::from(s.as_str())
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
