//! Service lines billed against a booking

use serde::Serialize;

use crate::{error::AppResult, models::ServiceUsage};

use super::ServiceUsagesRepository;

#[derive(Serialize)]
struct ByBooking {
    dat_phong_id: i64,
}

impl ServiceUsagesRepository {
    /// `GET booking-services?dat_phong_id={id}`
    pub async fn list_for_booking(&self, booking_id: i64) -> AppResult<Vec<ServiceUsage>> {
        self.list_where(&ByBooking {
            dat_phong_id: booking_id,
        })
        .await
    }
}
