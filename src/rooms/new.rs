use axum::{debug_handler, Json};
use serde::Serialize;

use crate::{
    auth::{random_string, AuthUser, DIGITS},
    db::Db,
    AppError, AppResult, AppState,
};

#[derive(Debug, Serialize)]
pub(crate) struct NewRoom {
    id: i64,
    name: String,
}

#[debug_handler(state = AppState)]
pub(crate) async fn new_room(AuthUser(user): AuthUser, mut db: Db) -> AppResult<Json<NewRoom>> {
    let name = format!("Unnamed Room {}", random_string(DIGITS, 6));

    let (id,): (i64,) = sqlx::query_as("INSERT INTO rooms (name) VALUES (?) RETURNING id")
        .bind(&name)
        .fetch_optional(&mut *db)
        .await?
        .ok_or_else(|| AppError::internal("Failed to create room"))?;

    tracing::info!("u/{} opened r/{id} {name}", user.id);
    Ok(Json(NewRoom { id, name }))
}
