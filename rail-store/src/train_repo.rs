use async_trait::async_trait;
use sqlx::SqlitePool;

use rail_core::repository::TrainRepository;
use rail_core::CoreResult;
use rail_shared::{NewTrain, Train};

use crate::database::store_error;

pub struct SqliteTrainRepository {
    pool: SqlitePool,
}

impl SqliteTrainRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TrainRow {
    train_id: i64,
    train_number: String,
    train_name: String,
    source: String,
    destination: String,
    total_seats: i64,
}

impl From<TrainRow> for Train {
    fn from(row: TrainRow) -> Self {
        Train {
            train_id: row.train_id,
            train_number: row.train_number,
            train_name: row.train_name,
            source: row.source,
            destination: row.destination,
            total_seats: row.total_seats,
        }
    }
}

#[async_trait]
impl TrainRepository for SqliteTrainRepository {
    async fn find_by_number(&self, train_number: &str) -> CoreResult<Option<Train>> {
        let row = sqlx::query_as::<_, TrainRow>(
            r#"
            SELECT train_id, train_number, train_name, source, destination, total_seats
            FROM trains
            WHERE train_number = ?
            "#,
        )
        .bind(train_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.map(Train::from))
    }

    async fn create_train(&self, train: &NewTrain) -> CoreResult<Train> {
        let train_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO trains (train_number, train_name, source, destination, total_seats)
            VALUES (?, ?, ?, ?, ?)
            RETURNING train_id
            "#,
        )
        .bind(&train.train_number)
        .bind(&train.train_name)
        .bind(&train.source)
        .bind(&train.destination)
        .bind(train.total_seats)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(Train {
            train_id,
            train_number: train.train_number.clone(),
            train_name: train.train_name.clone(),
            source: train.source.clone(),
            destination: train.destination.clone(),
            total_seats: train.total_seats,
        })
    }
}
