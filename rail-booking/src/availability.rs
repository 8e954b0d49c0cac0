use std::sync::Arc;

use rail_core::repository::{ReservationRepository, TrainRepository};
use rail_shared::Train;
use serde::Serialize;

use crate::{require, BookingError, BookingResult};

/// Seats left for one train, date and class.
#[derive(Debug, Clone, Serialize)]
pub struct Availability {
    pub train_number: String,
    pub train_name: String,
    pub journey_date: String,
    pub class_type: String,
    pub total_seats: i64,
    /// May go negative if a train's capacity shrank after bookings were taken.
    pub remaining: i64,
}

impl Availability {
    pub fn is_available(&self) -> bool {
        self.remaining > 0
    }
}

/// `total_seats - confirmed reservations` for a train/date/class.
pub struct AvailabilityCalculator {
    trains: Arc<dyn TrainRepository>,
    reservations: Arc<dyn ReservationRepository>,
}

impl AvailabilityCalculator {
    pub fn new(
        trains: Arc<dyn TrainRepository>,
        reservations: Arc<dyn ReservationRepository>,
    ) -> Self {
        Self { trains, reservations }
    }

    pub async fn check(
        &self,
        train_number: &str,
        journey_date: &str,
        class_type: &str,
    ) -> BookingResult<Availability> {
        require("train_number", train_number)?;
        require("journey_date", journey_date)?;
        require("class_type", class_type)?;

        let train = self
            .trains
            .find_by_number(train_number.trim())
            .await?
            .ok_or_else(|| BookingError::TrainNotFound(train_number.to_string()))?;

        self.for_train(&train, journey_date, class_type).await
    }

    pub async fn for_train(
        &self,
        train: &Train,
        journey_date: &str,
        class_type: &str,
    ) -> BookingResult<Availability> {
        let remaining = self
            .reservations
            .remaining_seats(train.train_id, journey_date, class_type)
            .await?
            .ok_or_else(|| BookingError::TrainNotFound(train.train_number.clone()))?;

        Ok(Availability {
            train_number: train.train_number.clone(),
            train_name: train.train_name.clone(),
            journey_date: journey_date.to_string(),
            class_type: class_type.to_string(),
            total_seats: train.total_seats,
            remaining,
        })
    }
}
