//! Booking sub-actions: server-side price calculation and checkout

use crate::{
    error::AppResult,
    models::{CheckoutResult, PriceBreakdown},
};

use super::BookingsRepository;

impl BookingsRepository {
    /// `GET bookings/{id}/calculate-price`
    pub async fn calculate_price(&self, booking_id: i64) -> AppResult<PriceBreakdown> {
        self.client
            .get(&format!("{}/{}/calculate-price", self.path, booking_id))
            .await
    }

    /// `POST bookings/{id}/checkout`; the backend finalizes the booking,
    /// frees the room and creates the invoice
    pub async fn checkout(&self, booking_id: i64) -> AppResult<CheckoutResult> {
        tracing::info!("Checking out booking {}", booking_id);
        self.client
            .post_empty(&format!("{}/{}/checkout", self.path, booking_id))
            .await
    }
}
