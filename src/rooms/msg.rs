use axum::{debug_handler, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    auth::AuthUser,
    db::{Db, Message},
    extract::{lenient_id, non_empty, IdPath, JsonBody},
    AppError, AppResult, AppState,
};

#[derive(Deserialize)]
pub(crate) struct SendMessageQuery {
    #[serde(default, deserialize_with = "lenient_id")]
    user_id: Option<i64>,
    body: Option<String>,
}

/// Messages in insertion order, each with its author's current name.
#[debug_handler(state = AppState)]
pub(crate) async fn list_msgs(
    _user: AuthUser,
    mut db: Db,
    IdPath(room_id): IdPath<i64>,
) -> AppResult<Json<Vec<Message>>> {
    let msgs = sqlx::query_as(
        "SELECT messages.id, users.name AS author, messages.body
        FROM messages
        JOIN users ON messages.user_id = users.id
        WHERE messages.room_id=?
        ORDER BY messages.id",
    )
    .bind(room_id)
    .fetch_all(&mut *db)
    .await?;

    Ok(Json(msgs))
}

/// The author is whoever `user_id` names, not necessarily the key's owner.
#[debug_handler(state = AppState)]
pub(crate) async fn send_msg(
    AuthUser(user): AuthUser,
    mut db: Db,
    IdPath(room_id): IdPath<i64>,
    JsonBody(SendMessageQuery { user_id, body }): JsonBody<SendMessageQuery>,
) -> AppResult<Json<Value>> {
    let (Some(user_id), Some(body)) = (user_id, non_empty(body)) else {
        return Err(AppError::invalid("User ID and message body are required"));
    };

    if sqlx::query("SELECT 1 FROM rooms WHERE id=?")
        .bind(room_id)
        .fetch_optional(&mut *db)
        .await?
        .is_none()
    {
        return Err(AppError::not_found("Room not found"));
    }

    let inserted = sqlx::query("INSERT INTO messages (user_id,room_id,body) VALUES (?,?,?)")
        .bind(user_id)
        .bind(room_id)
        .bind(&body)
        .execute(&mut *db)
        .await;

    match inserted {
        Ok(_) => {}
        Err(sqlx::Error::Database(err)) if err.is_foreign_key_violation() => {
            return Err(AppError::invalid("Unknown user"));
        }
        Err(err) => return Err(err.into()),
    }

    tracing::debug!("u/{} posted to r/{room_id} as u/{user_id}", user.id);
    Ok(Json(json!({ "message": "Message posted successfully" })))
}
