use std::sync::Arc;

use rail_core::repository::ReservationRepository;
use rail_shared::ReservationDetails;
use tracing::info;

use crate::{require, BookingError, BookingResult};

/// Looks up reservations by PNR and cancels them.
///
/// `CONFIRMED -> CANCELLED` is the only transition. Confirming a cancellation
/// twice is not an error; the second call rewrites the same status.
pub struct CancellationDesk {
    reservations: Arc<dyn ReservationRepository>,
}

impl CancellationDesk {
    pub fn new(reservations: Arc<dyn ReservationRepository>) -> Self {
        Self { reservations }
    }

    /// The confirmed reservation behind `pnr`, shown before the user confirms.
    pub async fn lookup(&self, pnr: &str) -> BookingResult<ReservationDetails> {
        require("pnr", pnr)?;
        let pnr = pnr.trim();

        self.reservations
            .find_details(pnr, true)
            .await?
            .ok_or_else(|| BookingError::ReservationNotFound(pnr.to_string()))
    }

    pub async fn confirm(&self, pnr: &str) -> BookingResult<()> {
        require("pnr", pnr)?;
        let pnr = pnr.trim();

        if !self.reservations.cancel(pnr).await? {
            return Err(BookingError::ReservationNotFound(pnr.to_string()));
        }

        info!(pnr = %pnr, "Reservation cancelled");
        Ok(())
    }
}
