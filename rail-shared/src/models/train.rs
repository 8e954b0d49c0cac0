use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Train {
    pub train_id: i64,
    pub train_number: String,
    pub train_name: String,
    pub source: String,
    pub destination: String,
    pub total_seats: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTrain {
    pub train_number: String,
    pub train_name: String,
    pub source: String,
    pub destination: String,
    pub total_seats: i64,
}
