use std::sync::Mutex;

use async_trait::async_trait;
use rail_core::repository::{ReservationRepository, SeatRequest, TrainRepository};
use rail_core::{CoreError, CoreResult};
use rail_shared::{NewTrain, Reservation, ReservationDetails, ReservationStatus, Train};

/// Store double holding trains and reservations behind one lock, so the
/// conditional insert is atomic just like the SQL statement it stands in for.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    trains: Vec<Train>,
    reservations: Vec<Reservation>,
}

impl State {
    fn remaining(&self, train: &Train, journey_date: &str, class_type: &str) -> i64 {
        let booked = self
            .reservations
            .iter()
            .filter(|r| {
                r.train_id == train.train_id
                    && r.journey_date == journey_date
                    && r.class_type == class_type
                    && r.status == ReservationStatus::Confirmed
            })
            .count() as i64;
        train.total_seats - booked
    }

    fn details(&self, reservation: &Reservation) -> Option<ReservationDetails> {
        let train = self.trains.iter().find(|t| t.train_id == reservation.train_id)?;
        Some(ReservationDetails {
            pnr_number: reservation.pnr_number.clone(),
            user_id: reservation.user_id,
            journey_date: reservation.journey_date.clone(),
            class_type: reservation.class_type.clone(),
            seat_number: reservation.seat_number,
            status: reservation.status,
            train_number: train.train_number.clone(),
            train_name: train.train_name.clone(),
            source: train.source.clone(),
            destination: train.destination.clone(),
        })
    }
}

impl InMemoryStore {
    pub fn with_train(train_number: &str, total_seats: i64) -> Self {
        let store = Self::default();
        store.state.lock().unwrap().trains.push(Train {
            train_id: 1,
            train_number: train_number.to_string(),
            train_name: "Express Line".to_string(),
            source: "City A".to_string(),
            destination: "City B".to_string(),
            total_seats,
        });
        store
    }

    pub fn reservation_count(&self) -> usize {
        self.state.lock().unwrap().reservations.len()
    }
}

#[async_trait]
impl TrainRepository for InMemoryStore {
    async fn find_by_number(&self, train_number: &str) -> CoreResult<Option<Train>> {
        let state = self.state.lock().unwrap();
        Ok(state.trains.iter().find(|t| t.train_number == train_number).cloned())
    }

    async fn create_train(&self, train: &NewTrain) -> CoreResult<Train> {
        let mut state = self.state.lock().unwrap();
        if state.trains.iter().any(|t| t.train_number == train.train_number) {
            return Err(CoreError::Duplicate("trains.train_number".to_string()));
        }
        let created = Train {
            train_id: state.trains.len() as i64 + 1,
            train_number: train.train_number.clone(),
            train_name: train.train_name.clone(),
            source: train.source.clone(),
            destination: train.destination.clone(),
            total_seats: train.total_seats,
        };
        state.trains.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl ReservationRepository for InMemoryStore {
    async fn remaining_seats(
        &self,
        train_id: i64,
        journey_date: &str,
        class_type: &str,
    ) -> CoreResult<Option<i64>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .trains
            .iter()
            .find(|t| t.train_id == train_id)
            .map(|train| state.remaining(train, journey_date, class_type)))
    }

    async fn insert_if_available(
        &self,
        pnr: &str,
        request: &SeatRequest,
    ) -> CoreResult<Option<i64>> {
        let mut state = self.state.lock().unwrap();
        if state.reservations.iter().any(|r| r.pnr_number == pnr) {
            return Err(CoreError::Duplicate("reservations.pnr_number".to_string()));
        }
        let Some(train) = state.trains.iter().find(|t| t.train_id == request.train_id) else {
            return Ok(None);
        };
        let remaining = state.remaining(train, &request.journey_date, &request.class_type);
        if remaining <= 0 {
            return Ok(None);
        }
        state.reservations.push(Reservation {
            pnr_number: pnr.to_string(),
            user_id: request.user_id,
            train_id: request.train_id,
            journey_date: request.journey_date.clone(),
            class_type: request.class_type.clone(),
            seat_number: remaining,
            status: ReservationStatus::Confirmed,
        });
        Ok(Some(remaining))
    }

    async fn find_details(
        &self,
        pnr: &str,
        confirmed_only: bool,
    ) -> CoreResult<Option<ReservationDetails>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .reservations
            .iter()
            .filter(|r| r.pnr_number == pnr)
            .filter(|r| !confirmed_only || r.status == ReservationStatus::Confirmed)
            .find_map(|r| state.details(r)))
    }

    async fn cancel(&self, pnr: &str) -> CoreResult<bool> {
        let mut state = self.state.lock().unwrap();
        match state.reservations.iter_mut().find(|r| r.pnr_number == pnr) {
            Some(reservation) => {
                reservation.status = ReservationStatus::Cancelled;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_for_user(&self, user_id: i64) -> CoreResult<Vec<ReservationDetails>> {
        let state = self.state.lock().unwrap();
        let mut rows: Vec<_> = state
            .reservations
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter_map(|r| state.details(r))
            .collect();
        rows.sort_by(|a, b| b.pnr_number.cmp(&a.pnr_number));
        Ok(rows)
    }
}
