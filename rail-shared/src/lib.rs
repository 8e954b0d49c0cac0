pub mod models;
pub mod pii;

pub use models::{
    NewTrain, NewUser, Reservation, ReservationDetails, ReservationStatus, Train, User,
};
pub use pii::Masked;
