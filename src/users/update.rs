use axum::{debug_handler, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    auth::AuthUser,
    db::Db,
    extract::{non_empty, JsonBody},
    AppError, AppResult, AppState,
};

#[derive(Deserialize)]
pub(crate) struct RenameQuery {
    new_name: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct PasswordQuery {
    new_password: Option<String>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn rename(
    AuthUser(user): AuthUser,
    mut db: Db,
    JsonBody(RenameQuery { new_name }): JsonBody<RenameQuery>,
) -> AppResult<Json<Value>> {
    let new_name = non_empty(new_name).ok_or_else(|| AppError::invalid("New username is required"))?;

    sqlx::query("UPDATE users SET name=? WHERE id=?")
        .bind(&new_name)
        .bind(user.id)
        .execute(&mut *db)
        .await?;

    tracing::info!("u/{} is now {new_name}", user.id);
    Ok(Json(json!({ "message": "Username updated successfully" })))
}

#[debug_handler(state = AppState)]
pub(crate) async fn change_password(
    AuthUser(user): AuthUser,
    mut db: Db,
    JsonBody(PasswordQuery { new_password }): JsonBody<PasswordQuery>,
) -> AppResult<Json<Value>> {
    let new_password = non_empty(new_password).ok_or_else(|| AppError::invalid("New password is required"))?;

    sqlx::query("UPDATE users SET password=? WHERE id=?")
        .bind(new_password)
        .bind(user.id)
        .execute(&mut *db)
        .await?;

    tracing::info!("u/{} changed password", user.id);
    Ok(Json(json!({ "message": "Password updated successfully" })))
}
