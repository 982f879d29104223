//! Authentication endpoints

use crate::{
    error::AppResult,
    models::user::{Credentials, LoginResponse, ProfileResponse, User},
};

use super::ApiClient;

#[derive(Clone)]
pub struct AuthRepository {
    client: ApiClient,
}

impl AuthRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `POST auth/login`
    pub async fn login(&self, credentials: &Credentials) -> AppResult<LoginResponse> {
        self.client.post("auth/login", credentials).await
    }

    /// `GET auth/profile`, validates the stored token
    pub async fn profile(&self) -> AppResult<User> {
        let response: ProfileResponse = self.client.get("auth/profile").await?;
        Ok(response.into())
    }
}
