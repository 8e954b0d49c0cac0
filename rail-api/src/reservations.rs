use axum::{
    extract::{Extension, State},
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use rail_booking::{BookingRequest, IssuedReservation};
use rail_shared::ReservationDetails;
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    middleware::{customer_auth_middleware, CustomerClaims},
    state::AppState,
};

/// Field names follow the reservation form.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReserveForm {
    pub train_number: String,
    pub journey_date: String,
    pub class_type: String,
}

#[derive(Debug, Serialize)]
pub struct ReserveResponse {
    pub message: String,
    pub category: &'static str,
    #[serde(flatten)]
    pub reservation: IssuedReservation,
}

#[derive(Debug, Serialize)]
pub struct ReservationListResponse {
    pub reservations: Vec<ReservationDetails>,
}

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/reserve", post(reserve))
        .route("/reservations", get(list_reservations))
        .route_layer(axum::middleware::from_fn_with_state(state, customer_auth_middleware))
}

async fn reserve(
    State(state): State<AppState>,
    Extension(claims): Extension<CustomerClaims>,
    Form(form): Form<ReserveForm>,
) -> Result<(StatusCode, Json<ReserveResponse>), AppError> {
    let request = BookingRequest {
        user_id: claims.user_id()?,
        train_number: form.train_number,
        journey_date: form.journey_date,
        class_type: form.class_type,
    };

    let reservation = state.issuer.reserve(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ReserveResponse {
            message: format!("Reservation successful! Your PNR is {}", reservation.pnr),
            category: "success",
            reservation,
        }),
    ))
}

async fn list_reservations(
    State(state): State<AppState>,
    Extension(claims): Extension<CustomerClaims>,
) -> Result<Json<ReservationListResponse>, AppError> {
    let reservations = state.history.for_user(claims.user_id()?).await?;
    Ok(Json(ReservationListResponse { reservations }))
}
