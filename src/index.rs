use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::AppState;

/// The single-page client: every client-side route gets `index.html`, other
/// files come from `static_dir`, and anything missing gets `404.html`.
pub fn router(static_dir: &Path) -> Router<AppState> {
    let index = ServeFile::new(static_dir.join("index.html"));
    let not_found = ServeFile::new(static_dir.join("404.html"));

    Router::new()
        .route_service("/", index.clone())
        .route_service("/profile", index.clone())
        .route_service("/login", index.clone())
        .route_service("/room", index.clone())
        .route_service("/room/{id}", index)
        .fallback_service(ServeDir::new(static_dir).not_found_service(not_found))
}
