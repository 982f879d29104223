//! Room endpoints beyond plain CRUD

use crate::{
    error::AppResult,
    models::{Room, RoomPayload, RoomStatus},
};

use super::RoomsRepository;

impl RoomsRepository {
    /// `PUT rooms/{id}` with only the status field
    pub async fn set_status(&self, room_id: i64, status: RoomStatus) -> AppResult<Room> {
        tracing::info!("Setting room {} status to '{}'", room_id, status);
        self.update(room_id, &RoomPayload::status_only(status)).await
    }
}
