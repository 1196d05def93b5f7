use axum::{debug_handler, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    auth::AuthUser,
    db::{Db, Room},
    extract::{lenient_id, non_empty, IdPath, JsonBody},
    AppError, AppResult, AppState,
};

#[derive(Deserialize)]
pub(crate) struct RenameRoomQuery {
    new_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    room_id: Option<i64>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn list_rooms(_user: AuthUser, mut db: Db) -> AppResult<Json<Vec<Room>>> {
    let rooms = sqlx::query_as("SELECT id,name FROM rooms ORDER BY id")
        .fetch_all(&mut *db)
        .await?;

    Ok(Json(rooms))
}

#[debug_handler(state = AppState)]
pub(crate) async fn room(
    _user: AuthUser,
    mut db: Db,
    IdPath(room_id): IdPath<i64>,
) -> AppResult<Json<Room>> {
    let room = sqlx::query_as("SELECT id,name FROM rooms WHERE id=?")
        .bind(room_id)
        .fetch_optional(&mut *db)
        .await?
        .ok_or_else(|| AppError::not_found("Room not found"))?;

    Ok(Json(room))
}

/// Renaming a room that doesn't exist still reports success; nothing changes.
#[debug_handler(state = AppState)]
pub(crate) async fn rename_room(
    AuthUser(user): AuthUser,
    mut db: Db,
    JsonBody(RenameRoomQuery { new_name, room_id }): JsonBody<RenameRoomQuery>,
) -> AppResult<Json<Value>> {
    let (Some(new_name), Some(room_id)) = (non_empty(new_name), room_id) else {
        return Err(AppError::invalid("New room name and room ID are required"));
    };

    sqlx::query("UPDATE rooms SET name=? WHERE id=?")
        .bind(&new_name)
        .bind(room_id)
        .execute(&mut *db)
        .await?;

    tracing::info!("u/{} renamed r/{room_id} to {new_name}", user.id);
    Ok(Json(json!({ "message": "Room name updated successfully" })))
}
