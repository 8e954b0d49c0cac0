use async_trait::async_trait;
use rail_shared::{NewTrain, NewUser, ReservationDetails, Train, User};

/// What the issuer asks the store to book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatRequest {
    pub user_id: i64,
    pub train_id: i64,
    pub journey_date: String,
    pub class_type: String,
}

/// A user row together with its stored password hash.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    pub user: User,
    pub password_hash: rail_shared::Masked<String>,
}

/// Repository trait for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user. Username or email clashes surface as `CoreError::Duplicate`.
    async fn create_user(&self, user: &NewUser) -> crate::CoreResult<User>;

    async fn find_credentials(
        &self,
        username: &str,
    ) -> crate::CoreResult<Option<StoredCredentials>>;
}

/// Repository trait for the train catalogue
#[async_trait]
pub trait TrainRepository: Send + Sync {
    async fn find_by_number(&self, train_number: &str) -> crate::CoreResult<Option<Train>>;

    async fn create_train(&self, train: &NewTrain) -> crate::CoreResult<Train>;
}

/// Repository trait for reservations
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// `total_seats - confirmed bookings` for the train/date/class, `None` if the train is unknown.
    async fn remaining_seats(
        &self,
        train_id: i64,
        journey_date: &str,
        class_type: &str,
    ) -> crate::CoreResult<Option<i64>>;

    /// Inserts a confirmed reservation only while seats remain, as one atomic step.
    /// Returns the assigned seat number, or `None` when nothing was left.
    /// A PNR that already exists surfaces as `CoreError::Duplicate`.
    async fn insert_if_available(
        &self,
        pnr: &str,
        request: &SeatRequest,
    ) -> crate::CoreResult<Option<i64>>;

    async fn find_details(
        &self,
        pnr: &str,
        confirmed_only: bool,
    ) -> crate::CoreResult<Option<ReservationDetails>>;

    /// Marks the reservation cancelled whatever its current status.
    /// Returns `false` when no reservation has this PNR.
    async fn cancel(&self, pnr: &str) -> crate::CoreResult<bool>;

    async fn list_for_user(&self, user_id: i64) -> crate::CoreResult<Vec<ReservationDetails>>;
}
