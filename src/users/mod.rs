mod update;

use axum::{routing::post, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/name", post(update::rename))
        .route("/password", post(update::change_password))
}
