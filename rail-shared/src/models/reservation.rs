use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reservation lifecycle. Only `Confirmed -> Cancelled` is ever taken.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown reservation status: {}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for ReservationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONFIRMED" => Ok(ReservationStatus::Confirmed),
            "CANCELLED" => Ok(ReservationStatus::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A row of the reservations table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub pnr_number: String,
    pub user_id: i64,
    pub train_id: i64,
    pub journey_date: String,
    pub class_type: String,
    /// Seats remaining when the booking was made, not a fixed seat identity.
    pub seat_number: i64,
    pub status: ReservationStatus,
}

/// Reservation joined with the train it is booked on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationDetails {
    pub pnr_number: String,
    pub user_id: i64,
    pub journey_date: String,
    pub class_type: String,
    pub seat_number: i64,
    pub status: ReservationStatus,
    pub train_number: String,
    pub train_name: String,
    pub source: String,
    pub destination: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text_matches_stored_values() {
        assert_eq!(ReservationStatus::Confirmed.to_string(), "CONFIRMED");
        assert_eq!("CANCELLED".parse::<ReservationStatus>().unwrap(), ReservationStatus::Cancelled);
        assert!("PENDING".parse::<ReservationStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_screaming_case() {
        let json = serde_json::to_string(&ReservationStatus::Confirmed).unwrap();
        assert_eq!(json, "\"CONFIRMED\"");
    }
}
