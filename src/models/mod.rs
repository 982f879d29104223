//! Records exchanged with the hotel backend
//!
//! The backend owns every entity. Records carry the fields the console reads
//! plus an `extra` map so unknown fields pass through unmodified.

pub mod booking;
pub mod customer;
pub mod enums;
pub mod invoice;
pub mod room;
pub mod room_type;
pub mod service;
pub mod settings;
pub mod stats;
pub mod user;

// Re-export commonly used types
pub use booking::{Booking, BookingPayload, CheckoutResult, PriceBreakdown};
pub use customer::{Customer, CustomerPayload};
pub use enums::{BookingStatus, PaymentStatus, RoomStatus};
pub use invoice::{Invoice, InvoicePayload};
pub use room::{Room, RoomPayload};
pub use room_type::{RoomType, RoomTypePayload};
pub use service::{Service, ServicePayload, ServiceUsage, ServiceUsagePayload};
pub use settings::DisplaySettings;
pub use stats::{RevenueGrouping, RevenueQuery, RevenueReport, RevenueRow};
pub use user::{Credentials, LoginResponse, User};

/// Record listed by a screen
pub trait Record {
    fn id(&self) -> i64;

    /// Text matched by the screen search box
    fn search_text(&self) -> String;
}
