use axum::{
    extract::State,
    routing::post,
    Form, Json, Router,
};
use rail_booking::BookingError;
use rail_shared::ReservationDetails;
use serde::{Deserialize, Serialize};

use crate::{error::AppError, state::AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PnrForm {
    pub pnr: String,
}

#[derive(Debug, Serialize)]
pub struct CancelLookupResponse {
    pub reservation: ReservationDetails,
}

#[derive(Debug, Serialize)]
pub struct CancelConfirmResponse {
    pub message: String,
    pub category: &'static str,
    pub pnr: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cancel", post(cancel))
        .route("/confirm_cancellation", post(confirm_cancellation))
}

/// Shows the confirmed reservation so the user can confirm the cancellation.
async fn cancel(
    State(state): State<AppState>,
    Form(form): Form<PnrForm>,
) -> Result<Json<CancelLookupResponse>, AppError> {
    let reservation = state.cancellations.lookup(&form.pnr).await?;
    Ok(Json(CancelLookupResponse { reservation }))
}

async fn confirm_cancellation(
    State(state): State<AppState>,
    Form(form): Form<PnrForm>,
) -> Result<Json<CancelConfirmResponse>, AppError> {
    state.cancellations.confirm(&form.pnr).await.map_err(|e| match e {
        BookingError::ReservationNotFound(_) => {
            AppError::NotFoundError("No reservation found for this PNR.".to_string())
        }
        other => other.into(),
    })?;

    Ok(Json(CancelConfirmResponse {
        message: "Reservation cancelled successfully.".to_string(),
        category: "success",
        pnr: form.pnr.trim().to_string(),
    }))
}
