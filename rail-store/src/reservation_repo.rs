use async_trait::async_trait;
use sqlx::SqlitePool;

use rail_core::repository::{ReservationRepository, SeatRequest};
use rail_core::{CoreError, CoreResult};
use rail_shared::{ReservationDetails, ReservationStatus};

use crate::database::store_error;

pub struct SqliteReservationRepository {
    pool: SqlitePool,
}

impl SqliteReservationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct DetailsRow {
    pnr_number: String,
    user_id: i64,
    journey_date: String,
    class_type: String,
    seat_number: i64,
    status: String,
    train_number: String,
    train_name: String,
    source: String,
    destination: String,
}

impl TryFrom<DetailsRow> for ReservationDetails {
    type Error = CoreError;

    fn try_from(row: DetailsRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<ReservationStatus>()
            .map_err(|e| CoreError::InternalError(e.to_string()))?;

        Ok(ReservationDetails {
            pnr_number: row.pnr_number,
            user_id: row.user_id,
            journey_date: row.journey_date,
            class_type: row.class_type,
            seat_number: row.seat_number,
            status,
            train_number: row.train_number,
            train_name: row.train_name,
            source: row.source,
            destination: row.destination,
        })
    }
}

const DETAILS_SELECT: &str = r#"
    SELECT r.pnr_number, r.user_id, r.journey_date, r.class_type, r.seat_number, r.status,
           t.train_number, t.train_name, t.source, t.destination
    FROM reservations r
    JOIN trains t ON r.train_id = t.train_id
"#;

#[async_trait]
impl ReservationRepository for SqliteReservationRepository {
    async fn remaining_seats(
        &self,
        train_id: i64,
        journey_date: &str,
        class_type: &str,
    ) -> CoreResult<Option<i64>> {
        sqlx::query_scalar(
            r#"
            SELECT t.total_seats - (
                SELECT COUNT(*) FROM reservations r
                WHERE r.train_id = t.train_id
                  AND r.journey_date = ?
                  AND r.class_type = ?
                  AND r.status = ?
            )
            FROM trains t
            WHERE t.train_id = ?
            "#,
        )
        .bind(journey_date)
        .bind(class_type)
        .bind(ReservationStatus::Confirmed.as_str())
        .bind(train_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)
    }

    async fn insert_if_available(
        &self,
        pnr: &str,
        request: &SeatRequest,
    ) -> CoreResult<Option<i64>> {
        let confirmed = ReservationStatus::Confirmed.as_str();

        // Count and insert in one statement; SQLite serializes writers, so
        // no other booking can slip in between.
        sqlx::query_scalar(
            r#"
            INSERT INTO reservations
                (pnr_number, user_id, train_id, journey_date, class_type, seat_number, status)
            SELECT ?, ?, t.train_id, ?, ?, t.total_seats - b.booked, ?
            FROM trains t,
                 (SELECT COUNT(*) AS booked FROM reservations
                  WHERE train_id = ? AND journey_date = ? AND class_type = ? AND status = ?) b
            WHERE t.train_id = ? AND t.total_seats - b.booked > 0
            RETURNING seat_number
            "#,
        )
        .bind(pnr)
        .bind(request.user_id)
        .bind(&request.journey_date)
        .bind(&request.class_type)
        .bind(confirmed)
        .bind(request.train_id)
        .bind(&request.journey_date)
        .bind(&request.class_type)
        .bind(confirmed)
        .bind(request.train_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)
    }

    async fn find_details(
        &self,
        pnr: &str,
        confirmed_only: bool,
    ) -> CoreResult<Option<ReservationDetails>> {
        let sql = if confirmed_only {
            format!("{} WHERE r.pnr_number = ? AND r.status = ?", DETAILS_SELECT)
        } else {
            format!("{} WHERE r.pnr_number = ?", DETAILS_SELECT)
        };

        let mut query = sqlx::query_as::<_, DetailsRow>(&sql).bind(pnr);
        if confirmed_only {
            query = query.bind(ReservationStatus::Confirmed.as_str());
        }

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;

        row.map(ReservationDetails::try_from).transpose()
    }

    async fn cancel(&self, pnr: &str) -> CoreResult<bool> {
        let result = sqlx::query("UPDATE reservations SET status = ? WHERE pnr_number = ?")
            .bind(ReservationStatus::Cancelled.as_str())
            .bind(pnr)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_for_user(&self, user_id: i64) -> CoreResult<Vec<ReservationDetails>> {
        let sql = format!("{} WHERE r.user_id = ? ORDER BY r.pnr_number DESC", DETAILS_SELECT);

        let rows = sqlx::query_as::<_, DetailsRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;

        rows.into_iter().map(ReservationDetails::try_from).collect()
    }
}
