pub mod appresult;
pub mod auth;
pub mod config;
pub mod db;
pub mod extract;
pub mod index;
pub mod res;
pub mod rooms;
pub mod users;

use std::path::Path;

use axum::{extract::FromRef, Router};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub use appresult::{AppError, AppResult};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
}

fn api() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/user", users::router())
        .nest("/rooms", rooms::router())
}

/// Just the JSON API under `/api`.
pub fn router(app_state: AppState) -> Router {
    Router::new()
        .nest("/api", api())
        .with_state(app_state)
}

/// The API plus the static client, with request tracing.
pub fn app(app_state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .nest("/api", api())
        .merge(index::router(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
