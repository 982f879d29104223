//! Revenue statistics endpoint

use crate::{
    error::{AppError, AppResult},
    models::stats::{RevenueQuery, RevenueReport, RevenueResponse},
};

use super::ApiClient;

#[derive(Clone)]
pub struct StatsRepository {
    client: ApiClient,
}

impl StatsRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET statistics/revenue?tu_ngay=&den_ngay=&kieu=`
    pub async fn revenue(&self, query: &RevenueQuery) -> AppResult<RevenueReport> {
        query.check_range().map_err(AppError::Validation)?;
        let response: RevenueResponse = self
            .client
            .get_with_query("statistics/revenue", query)
            .await?;
        Ok(response.into())
    }
}
