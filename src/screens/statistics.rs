//! Revenue statistics screen

use chrono::{Datelike, NaiveDate};
use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::{
    error::AppResult,
    models::{RevenueGrouping, RevenueQuery, RevenueReport, RevenueRow},
    repository::StatsRepository,
};

use super::Notification;

/// Figures derived from the rows the backend returned
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevenueSummary {
    pub total: Decimal,
    pub room_revenue: Decimal,
    pub service_revenue: Decimal,
    pub invoice_count: i64,
    /// Revenue per bucket, in the order received
    pub by_period: IndexMap<String, Decimal>,
    /// Highest-revenue bucket; the earliest wins a tie
    pub best_period: Option<(String, Decimal)>,
}

impl RevenueSummary {
    pub fn from_rows(rows: &[RevenueRow]) -> Self {
        let mut summary = RevenueSummary::default();
        for row in rows {
            summary.total += row.doanh_thu;
            summary.room_revenue += row.tien_phong.unwrap_or_default();
            summary.service_revenue += row.tien_dich_vu.unwrap_or_default();
            summary.invoice_count += row.so_hoa_don.unwrap_or_default();
            *summary
                .by_period
                .entry(row.thoi_gian.clone())
                .or_default() += row.doanh_thu;
        }
        summary.best_period = summary
            .by_period
            .iter()
            .fold(None, |best: Option<(&String, &Decimal)>, (period, amount)| {
                match best {
                    Some((_, top)) if top >= amount => best,
                    _ => Some((period, amount)),
                }
            })
            .map(|(period, amount)| (period.clone(), *amount));
        summary
    }

    /// Mean revenue per bucket, zero when there is none
    pub fn average_per_period(&self) -> Decimal {
        if self.by_period.is_empty() {
            return Decimal::ZERO;
        }
        (self.total / Decimal::from(self.by_period.len())).round_dp(0)
    }
}

pub const NO_REVENUE_DATA: &str = "Không có dữ liệu doanh thu trong khoảng thời gian này";

pub struct StatisticsScreen {
    repository: StatsRepository,
    pub query: RevenueQuery,
    pub report: Option<RevenueReport>,
    pub loading: bool,
    notification: Option<Notification>,
}

impl StatisticsScreen {
    /// Starts on the current month, grouped by day
    pub fn new(repository: StatsRepository, today: NaiveDate) -> Self {
        Self {
            repository,
            query: Self::month_to_date(today),
            report: None,
            loading: false,
            notification: None,
        }
    }

    pub fn month_to_date(today: NaiveDate) -> RevenueQuery {
        RevenueQuery {
            tu_ngay: today.with_day(1),
            den_ngay: Some(today),
            kieu: Some(RevenueGrouping::Day),
        }
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub async fn load(&mut self) -> AppResult<&RevenueReport> {
        self.loading = true;
        let result = self.repository.revenue(&self.query).await;
        self.loading = false;

        match result {
            Ok(report) => {
                tracing::debug!("Revenue report with {} rows", report.rows.len());
                self.notification = report
                    .rows
                    .is_empty()
                    .then(|| Notification::info(NO_REVENUE_DATA));
                Ok(&*self.report.insert(report))
            }
            Err(e) => {
                tracing::error!("Loading revenue report failed: {}", e);
                self.notification = Some(Notification::from(&e));
                Err(e)
            }
        }
    }

    pub fn summary(&self) -> Option<RevenueSummary> {
        self.report
            .as_ref()
            .map(|report| RevenueSummary::from_rows(&report.rows))
    }
}
