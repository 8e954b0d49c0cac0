mod reservation;
mod train;
mod user;

pub use reservation::{Reservation, ReservationDetails, ReservationStatus, UnknownStatus};
pub use train::{NewTrain, Train};
pub use user::{NewUser, User};
