//! Screen state and user actions
//!
//! Each screen owns its local state, issues the HTTP calls behind a user
//! action and refetches the affected collection afterwards. Failures are
//! logged and surfaced as a transient notification; nothing is retried.

pub mod crud;
pub mod dashboard;
pub mod invoices;
pub mod statistics;

use crate::error::AppError;

pub use crud::CrudScreen;
pub use dashboard::{find_active_booking_id, DashboardScreen, RoomAction};
pub use invoices::InvoicesScreen;
pub use statistics::{RevenueSummary, StatisticsScreen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Error,
}

/// Transient message shown after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl From<&AppError> for Notification {
    fn from(err: &AppError) -> Self {
        Notification::error(err.user_message())
    }
}
