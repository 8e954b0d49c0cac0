use rail_core::repository::{TrainRepository, UserRepository};
use rail_shared::{Masked, NewTrain, NewUser, Train};
use tempfile::TempDir;

use crate::app_config::DatabaseConfig;
use crate::{DbClient, SqliteTrainRepository, SqliteUserRepository};

/// Migrated SQLite file in a temp dir; removed when dropped.
pub struct TestDb {
    _dir: TempDir,
    pub client: DbClient,
}

impl TestDb {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite://{}", dir.path().join("rail.db").display()),
            max_connections: 4,
        };
        let client = DbClient::new(&config).await.unwrap();
        client.migrate().await.unwrap();
        Self { _dir: dir, client }
    }

    pub async fn train(&self, train_number: &str, total_seats: i64) -> Train {
        SqliteTrainRepository::new(self.client.pool.clone())
            .create_train(&NewTrain {
                train_number: train_number.to_string(),
                train_name: "Express Line".to_string(),
                source: "City A".to_string(),
                destination: "City B".to_string(),
                total_seats,
            })
            .await
            .unwrap()
    }

    pub async fn user(&self, username: &str) -> i64 {
        SqliteUserRepository::new(self.client.pool.clone())
            .create_user(&NewUser {
                username: username.to_string(),
                password_hash: Masked::new("$argon2id$v=19$stub".to_string()),
                full_name: username.to_string(),
                email: Masked::new(format!("{}@example.com", username)),
            })
            .await
            .unwrap()
            .user_id
    }
}
