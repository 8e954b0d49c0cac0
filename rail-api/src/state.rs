use std::sync::Arc;

use rail_booking::{AvailabilityCalculator, CancellationDesk, ReservationHistory, ReservationIssuer};
use rail_core::identity::Authenticator;
use rail_core::pnr::PnrGenerator;
use rail_core::repository::{ReservationRepository, TrainRepository, UserRepository};
use rail_store::app_config::BookingRules;
use rail_store::{DbClient, SqliteReservationRepository, SqliteTrainRepository, SqliteUserRepository};

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub trains: Arc<dyn TrainRepository>,
    pub authenticator: Arc<Authenticator>,
    pub availability: Arc<AvailabilityCalculator>,
    pub issuer: Arc<ReservationIssuer>,
    pub cancellations: Arc<CancellationDesk>,
    pub history: Arc<ReservationHistory>,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(db: DbClient, auth: AuthConfig, rules: &BookingRules) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(db.pool.clone()));
        let trains: Arc<dyn TrainRepository> = Arc::new(SqliteTrainRepository::new(db.pool.clone()));
        let reservations: Arc<dyn ReservationRepository> =
            Arc::new(SqliteReservationRepository::new(db.pool.clone()));

        let pnr = Arc::new(PnrGenerator::new(rules.pnr_prefix.clone(), rules.pnr_suffix_digits));

        Self {
            authenticator: Arc::new(Authenticator::new(users)),
            availability: Arc::new(AvailabilityCalculator::new(trains.clone(), reservations.clone())),
            issuer: Arc::new(ReservationIssuer::new(
                trains.clone(),
                reservations.clone(),
                pnr,
                rules.pnr_max_attempts,
            )),
            cancellations: Arc::new(CancellationDesk::new(reservations.clone())),
            history: Arc::new(ReservationHistory::new(reservations)),
            trains,
            auth,
        }
    }
}
