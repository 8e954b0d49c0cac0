use serde::{Deserialize, Serialize};
use crate::pii::Masked;

/// A registered account. The password hash never leaves the store layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub full_name: String,
    pub email: Masked<String>,
}

/// Registration payload after the password has been hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: Masked<String>,
    pub full_name: String,
    pub email: Masked<String>,
}
