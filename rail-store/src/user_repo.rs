use async_trait::async_trait;
use sqlx::SqlitePool;

use rail_core::repository::{StoredCredentials, UserRepository};
use rail_core::CoreResult;
use rail_shared::{Masked, NewUser, User};

use crate::database::store_error;

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    username: String,
    password_hash: String,
    full_name: String,
    email: String,
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create_user(&self, user: &NewUser) -> CoreResult<User> {
        let user_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (username, password_hash, full_name, email)
            VALUES (?, ?, ?, ?)
            RETURNING user_id
            "#,
        )
        .bind(&user.username)
        .bind(user.password_hash.expose())
        .bind(&user.full_name)
        .bind(user.email.expose())
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(User {
            user_id,
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
        })
    }

    async fn find_credentials(&self, username: &str) -> CoreResult<Option<StoredCredentials>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, username, password_hash, full_name, email
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.map(|row| StoredCredentials {
            user: User {
                user_id: row.user_id,
                username: row.username,
                full_name: row.full_name,
                email: Masked::new(row.email),
            },
            password_hash: Masked::new(row.password_hash),
        }))
    }
}
