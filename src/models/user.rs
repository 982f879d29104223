//! Staff user record and login payloads

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Authenticated staff member, as returned by login and `auth/profile`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default, alias = "ten_dang_nhap")]
    pub username: String,
    #[serde(default, alias = "name")]
    pub ho_ten: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Role string, compared case-insensitively
    #[serde(default, alias = "role")]
    pub vai_tro: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl User {
    pub fn role(&self) -> &str {
        &self.vai_tro
    }

    /// True when the role matches any of `allowed`, ignoring case
    pub fn has_any_role(&self, allowed: &[&str]) -> bool {
        let role = self.vai_tro.trim().to_lowercase();
        allowed
            .iter()
            .any(|candidate| candidate.trim().to_lowercase() == role)
    }

    pub fn display_name(&self) -> &str {
        self.ho_ten
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// Login form
#[derive(Debug, Clone, Serialize, Validate)]
pub struct Credentials {
    #[validate(length(min = 1, message = "Vui lòng nhập tên đăng nhập"))]
    pub username: String,
    #[validate(length(min = 1, message = "Vui lòng nhập mật khẩu"))]
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Response body of `auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "access_token")]
    pub token: String,
    pub user: User,
}

/// `auth/profile` may answer with the bare user or wrapped in `{ "user": ... }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProfileResponse {
    Wrapped { user: User },
    Bare(User),
}

impl From<ProfileResponse> for User {
    fn from(response: ProfileResponse) -> Self {
        match response {
            ProfileResponse::Wrapped { user } => user,
            ProfileResponse::Bare(user) => user,
        }
    }
}
