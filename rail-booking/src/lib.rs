pub mod availability;
pub mod issuer;
pub mod cancellation;
pub mod history;

#[cfg(test)]
mod testing;

use rail_core::CoreError;

pub use availability::{Availability, AvailabilityCalculator};
pub use issuer::{BookingRequest, IssuedReservation, ReservationIssuer};
pub use cancellation::CancellationDesk;
pub use history::ReservationHistory;

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Invalid booking request: {0}")]
    InvalidRequest(String),

    #[error("Train not found: {0}")]
    TrainNotFound(String),

    #[error("No seats available on train {train_number} for {journey_date} ({class_type})")]
    SoldOut {
        train_number: String,
        journey_date: String,
        class_type: String,
    },

    #[error("Could not allocate a unique PNR after {0} attempts")]
    PnrExhausted(u32),

    #[error("No confirmed reservation found for PNR {0}")]
    ReservationNotFound(String),

    #[error(transparent)]
    Store(#[from] CoreError),
}

pub type BookingResult<T> = Result<T, BookingError>;

pub(crate) fn require(field: &str, value: &str) -> BookingResult<()> {
    if value.trim().is_empty() {
        return Err(BookingError::InvalidRequest(format!("{} must not be empty", field)));
    }
    Ok(())
}
