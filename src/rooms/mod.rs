mod msg;
mod new;
mod room;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(room::list_rooms))
        .route("/new", post(new::new_room))
        .route("/name", post(room::rename_room))
        .route("/{id}", get(room::room))
        .route("/{id}/messages", get(msg::list_msgs).post(msg::send_msg))
}
