use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use rail_booking::Availability;
use serde::{Deserialize, Serialize};

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct TrainNameQuery {
    pub train_number: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TrainNameResponse {
    pub train_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AvailabilityQuery {
    pub train_number: String,
    pub journey_date: String,
    pub class_type: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/get_train_name", get(get_train_name))
        .route("/availability", get(get_availability))
}

/// Lookup used by the reservation form; an unknown number yields `null`, not an error.
async fn get_train_name(
    State(state): State<AppState>,
    Query(query): Query<TrainNameQuery>,
) -> Result<Json<TrainNameResponse>, AppError> {
    let train_name = match query.train_number.as_deref().map(str::trim) {
        Some(number) if !number.is_empty() => state
            .trains
            .find_by_number(number)
            .await?
            .map(|train| train.train_name),
        _ => None,
    };

    Ok(Json(TrainNameResponse { train_name }))
}

async fn get_availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Availability>, AppError> {
    let availability = state
        .availability
        .check(&query.train_number, query.journey_date.trim(), query.class_type.trim())
        .await?;

    Ok(Json(availability))
}
