use std::sync::Arc;

use rail_core::repository::ReservationRepository;
use rail_shared::ReservationDetails;

use crate::BookingResult;

/// A user's reservations in every status, newest reference first.
pub struct ReservationHistory {
    reservations: Arc<dyn ReservationRepository>,
}

impl ReservationHistory {
    pub fn new(reservations: Arc<dyn ReservationRepository>) -> Self {
        Self { reservations }
    }

    pub async fn for_user(&self, user_id: i64) -> BookingResult<Vec<ReservationDetails>> {
        Ok(self.reservations.list_for_user(user_id).await?)
    }
}
