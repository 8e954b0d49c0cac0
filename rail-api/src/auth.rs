use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Form, Json, Router,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use rail_core::identity::Registration;
use rail_core::CoreError;
use rail_shared::{Masked, User};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    middleware::auth::{CustomerClaims, CUSTOMER_ROLE},
    state::{AppState, AuthConfig},
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: Masked<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub username: String,
    pub password: Masked<String>,
    pub full_name: String,
    pub email: Masked<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub category: &'static str,
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub category: &'static str,
    pub user_id: i64,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
}

async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = state
        .authenticator
        .login(&form.username, form.password.expose())
        .await?
        .ok_or_else(|| AppError::AuthenticationError("Invalid credentials".to_string()))?;

    let token = issue_token(&state.auth, &user)?;

    Ok(Json(LoginResponse {
        message: "Login successful!".to_string(),
        category: "success",
        token,
        user,
    }))
}

async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let user = state
        .authenticator
        .register(Registration {
            username: form.username,
            password: form.password,
            full_name: form.full_name,
            email: form.email,
        })
        .await
        .map_err(|e| match e {
            CoreError::Duplicate(_) => {
                AppError::ConflictError("Username or email already exists.".to_string())
            }
            other => other.into(),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registration successful!".to_string(),
            category: "success",
            user_id: user.user_id,
        }),
    ))
}

pub fn issue_token(auth: &AuthConfig, user: &User) -> Result<String, AppError> {
    let claims = CustomerClaims {
        sub: user.user_id.to_string(),
        username: user.username.clone(),
        role: CUSTOMER_ROLE.to_owned(),
        exp: expires_at(auth.expiration)?,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(auth.secret.as_bytes()))
        .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))
}

fn expires_at(lifetime_seconds: u64) -> Result<usize, AppError> {
    i64::try_from(lifetime_seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
        .and_then(|expiry| usize::try_from(expiry.timestamp()).ok())
        .ok_or_else(|| {
            AppError::InternalServerError(format!(
                "Token lifetime of {} seconds is out of range",
                lifetime_seconds
            ))
        })
}
