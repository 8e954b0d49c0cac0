use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod cancellation;
pub mod error;
pub mod middleware;
pub mod reservations;
pub mod state;
pub mod trains;

pub use state::{AppState, AuthConfig};

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .merge(auth::routes())
        .merge(trains::routes())
        .merge(reservations::routes(state.clone()))
        .merge(cancellation::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
