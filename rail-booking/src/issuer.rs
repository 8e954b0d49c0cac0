use std::sync::Arc;

use rail_core::pnr::PnrSource;
use rail_core::repository::{ReservationRepository, SeatRequest, TrainRepository};
use rail_core::CoreError;
use serde::Serialize;
use tracing::{info, warn};

use crate::{require, BookingError, BookingResult};

/// A reservation request on behalf of an authenticated user.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub user_id: i64,
    pub train_number: String,
    pub journey_date: String,
    pub class_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IssuedReservation {
    pub pnr: String,
    pub train_number: String,
    pub train_name: String,
    pub journey_date: String,
    pub class_type: String,
    pub seat_number: i64,
    /// Seats left on this train/date/class right after the booking.
    pub remaining: i64,
}

/// Issues confirmed reservations.
///
/// The availability check and the insert happen in one store call
/// (`insert_if_available`), so two callers racing for the last seat cannot
/// both succeed. A PNR clash is retried with a fresh reference up to
/// `max_attempts` times.
pub struct ReservationIssuer {
    trains: Arc<dyn TrainRepository>,
    reservations: Arc<dyn ReservationRepository>,
    pnr: Arc<dyn PnrSource>,
    max_attempts: u32,
}

impl ReservationIssuer {
    pub fn new(
        trains: Arc<dyn TrainRepository>,
        reservations: Arc<dyn ReservationRepository>,
        pnr: Arc<dyn PnrSource>,
        max_attempts: u32,
    ) -> Self {
        Self {
            trains,
            reservations,
            pnr,
            max_attempts: max_attempts.max(1),
        }
    }

    pub async fn reserve(&self, request: &BookingRequest) -> BookingResult<IssuedReservation> {
        require("train_number", &request.train_number)?;
        require("journey_date", &request.journey_date)?;
        require("class_type", &request.class_type)?;

        // 1. Resolve train
        let train_number = request.train_number.trim();
        let train = self
            .trains
            .find_by_number(train_number)
            .await?
            .ok_or_else(|| BookingError::TrainNotFound(train_number.to_string()))?;

        let seat_request = SeatRequest {
            user_id: request.user_id,
            train_id: train.train_id,
            journey_date: request.journey_date.trim().to_string(),
            class_type: request.class_type.trim().to_string(),
        };

        // 2. Book with a fresh PNR, retrying only on PNR collisions
        for attempt in 1..=self.max_attempts {
            let pnr = self.pnr.next_pnr();

            let outcome = self.reservations.insert_if_available(&pnr, &seat_request).await;

            match outcome {
                Ok(Some(seat_number)) => {
                    info!(
                        pnr = %pnr,
                        user_id = request.user_id,
                        train_number = %train.train_number,
                        journey_date = %seat_request.journey_date,
                        class_type = %seat_request.class_type,
                        seat_number,
                        "Reservation confirmed"
                    );
                    return Ok(IssuedReservation {
                        pnr,
                        train_number: train.train_number,
                        train_name: train.train_name,
                        journey_date: seat_request.journey_date,
                        class_type: seat_request.class_type,
                        seat_number,
                        remaining: seat_number - 1,
                    });
                }
                Ok(None) => {
                    info!(train_number = %train.train_number, "No seats available");
                    return Err(BookingError::SoldOut {
                        train_number: train.train_number,
                        journey_date: seat_request.journey_date,
                        class_type: seat_request.class_type,
                    });
                }
                Err(CoreError::Duplicate(_)) => {
                    warn!(pnr = %pnr, attempt, "PNR collision, retrying with a new reference");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(BookingError::PnrExhausted(self.max_attempts))
    }
}
