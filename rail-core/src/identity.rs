use std::sync::Arc;

use rail_shared::{Masked, NewUser, User};

use crate::password::{hash_password, verify_password, verify_unknown_user};
use crate::repository::UserRepository;
use crate::{CoreError, CoreResult};

/// Registration form after it has been parsed by the route layer.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub password: Masked<String>,
    pub full_name: String,
    pub email: Masked<String>,
}

/// Registers accounts and checks credentials against the stored hashes.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn register(&self, registration: Registration) -> CoreResult<User> {
        // 1. Reject blank fields before touching the store
        let fields = [
            ("username", registration.username.as_str()),
            ("password", registration.password.expose().as_str()),
            ("full_name", registration.full_name.as_str()),
            ("email", registration.email.expose().as_str()),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(CoreError::ValidationError(format!("{} must not be empty", name)));
        }

        // 2. Hash, never store the clear text
        let password_hash = hash_password(registration.password.expose())?;

        // 3. Insert; unique constraints decide duplicates
        let user = self
            .users
            .create_user(&NewUser {
                username: registration.username.trim().to_string(),
                password_hash: Masked::new(password_hash),
                full_name: registration.full_name.trim().to_string(),
                email: Masked::new(registration.email.expose().trim().to_string()),
            })
            .await?;

        tracing::info!(user_id = user.user_id, username = %user.username, "Registered user");
        Ok(user)
    }

    /// Returns the user when the password matches. Unknown users and wrong
    /// passwords both yield `None` after one password verification each.
    pub async fn login(&self, username: &str, password: &str) -> CoreResult<Option<User>> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(CoreError::ValidationError(
                "username and password must not be empty".to_string(),
            ));
        }

        let Some(stored) = self.users.find_credentials(username).await? else {
            verify_unknown_user(password);
            tracing::warn!(username = %username, "Login rejected");
            return Ok(None);
        };

        if verify_password(password, stored.password_hash.expose())? {
            tracing::info!(user_id = stored.user.user_id, "Login accepted");
            Ok(Some(stored.user))
        } else {
            tracing::warn!(username = %username, "Login rejected");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::StoredCredentials;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Instant;

    #[derive(Default)]
    struct InMemoryUsers {
        rows: Mutex<Vec<StoredCredentials>>,
    }

    #[async_trait]
    impl UserRepository for InMemoryUsers {
        async fn create_user(&self, user: &NewUser) -> CoreResult<User> {
            let mut rows = self.rows.lock().unwrap();
            let clash = rows.iter().any(|row| {
                row.user.username == user.username || row.user.email.expose() == user.email.expose()
            });
            if clash {
                return Err(CoreError::Duplicate("users.username".to_string()));
            }

            let created = User {
                user_id: rows.len() as i64 + 1,
                username: user.username.clone(),
                full_name: user.full_name.clone(),
                email: user.email.clone(),
            };
            rows.push(StoredCredentials {
                user: created.clone(),
                password_hash: user.password_hash.clone(),
            });
            Ok(created)
        }

        async fn find_credentials(&self, username: &str) -> CoreResult<Option<StoredCredentials>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|row| row.user.username == username).cloned())
        }
    }

    fn registration(username: &str, email: &str) -> Registration {
        Registration {
            username: username.to_string(),
            password: Masked::new("hunter2".to_string()),
            full_name: "Asha Rao".to_string(),
            email: Masked::new(email.to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let users = Arc::new(InMemoryUsers::default());
        let auth = Authenticator::new(users.clone());

        let user = auth.register(registration("asha", "asha@example.com")).await.unwrap();
        assert_eq!(user.username, "asha");

        let stored = users.find_credentials("asha").await.unwrap().unwrap();
        assert_ne!(stored.password_hash.expose(), "hunter2");

        let logged_in = auth.login("asha", "hunter2").await.unwrap();
        assert_eq!(logged_in.map(|u| u.user_id), Some(user.user_id));
    }

    #[tokio::test]
    async fn test_bad_credentials_are_indistinguishable() {
        let auth = Authenticator::new(Arc::new(InMemoryUsers::default()));
        auth.register(registration("asha", "asha@example.com")).await.unwrap();

        assert!(auth.login("asha", "wrong").await.unwrap().is_none());
        assert!(auth.login("nobody", "hunter2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_user_pays_for_a_password_check() {
        let auth = Authenticator::new(Arc::new(InMemoryUsers::default()));
        auth.register(registration("asha", "asha@example.com")).await.unwrap();

        let started = Instant::now();
        for _ in 0..3 {
            assert!(auth.login("asha", "wrong").await.unwrap().is_none());
        }
        let wrong_password = started.elapsed();

        let started = Instant::now();
        for _ in 0..3 {
            assert!(auth.login("nobody", "wrong").await.unwrap().is_none());
        }
        let unknown_user = started.elapsed();

        assert!(
            unknown_user * 4 > wrong_password,
            "unknown user took {:?}, wrong password took {:?}",
            unknown_user,
            wrong_password
        );
    }

    #[tokio::test]
    async fn test_blank_login_fails_validation() {
        let auth = Authenticator::new(Arc::new(InMemoryUsers::default()));

        for (username, password) in [("", ""), ("  ", "hunter2"), ("asha", "")] {
            let result = auth.login(username, password).await;
            assert!(matches!(result, Err(CoreError::ValidationError(_))));
        }
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let users = Arc::new(InMemoryUsers::default());
        let auth = Authenticator::new(users.clone());
        auth.register(registration("asha", "asha@example.com")).await.unwrap();

        let second = auth.register(registration("asha", "other@example.com")).await;

        assert!(matches!(second, Err(CoreError::Duplicate(_))));
        assert_eq!(users.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_field_fails_validation() {
        let auth = Authenticator::new(Arc::new(InMemoryUsers::default()));

        let result = auth.register(registration("  ", "asha@example.com")).await;

        assert!(matches!(result, Err(CoreError::ValidationError(_))));
    }
}
