//! Error types for the front-desk console

use reqwest::StatusCode;
use thiserror::Error;

/// Fallback shown when a failed request carries no server message
pub const GENERIC_FAILURE_MESSAGE: &str = "Đã xảy ra lỗi, vui lòng thử lại";

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP 401, the stored credentials have already been cleared
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Inline validation failure, raised before any HTTP call is issued
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Request failed with status {status}")]
    Request {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    /// Text for the transient notification: the server-provided message or a generic fallback
    pub fn user_message(&self) -> String {
        match self {
            AppError::Authentication(msg)
            | AppError::Authorization(msg)
            | AppError::NotFound(msg)
            | AppError::Validation(msg) => msg.clone(),
            AppError::Request {
                message: Some(msg), ..
            } => msg.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    /// HTTP status carried by the error, if it came from a server response
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Authentication(_) => Some(StatusCode::UNAUTHORIZED),
            AppError::Authorization(_) => Some(StatusCode::FORBIDDEN),
            AppError::NotFound(_) => Some(StatusCode::NOT_FOUND),
            AppError::Request { status, .. } => Some(*status),
            AppError::Network(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Authentication(_))
    }

    /// Build an error from a non-success response status and the server message, if any
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => AppError::Authentication(
                message.unwrap_or_else(|| "Phiên đăng nhập đã hết hạn".to_string()),
            ),
            StatusCode::FORBIDDEN => AppError::Authorization(
                message.unwrap_or_else(|| "Không có quyền truy cập".to_string()),
            ),
            StatusCode::NOT_FOUND => AppError::NotFound(
                message.unwrap_or_else(|| "Không tìm thấy dữ liệu".to_string()),
            ),
            _ => AppError::Request { status, message },
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} không hợp lệ", field))
                })
            })
            .collect();
        messages.sort();
        AppError::Validation(messages.join("; "))
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
