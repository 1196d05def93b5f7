use axum::{debug_handler, Json};
use serde::Deserialize;

use crate::{
    db::Db,
    extract::{non_empty, JsonBody},
    AppError, AppResult, AppState,
};

use super::{authenticate, signup::Credentials};

#[derive(Deserialize)]
pub(crate) struct LoginQuery {
    // the bundled client sends camelCase here
    #[serde(alias = "userName")]
    user_name: Option<String>,
    password: Option<String>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn login(
    mut db: Db,
    JsonBody(LoginQuery { user_name, password }): JsonBody<LoginQuery>,
) -> AppResult<Json<Credentials>> {
    let (Some(user_name), Some(password)) = (non_empty(user_name), non_empty(password)) else {
        return Err(AppError::invalid("Username and password are required"));
    };

    let Some(user) = authenticate(&mut db, &user_name, &password).await? else {
        tracing::debug!("failed login for {user_name:?}");
        return Err(AppError::BadCredentials("Invalid credentials".to_owned()));
    };

    tracing::info!("welcome u/{} {}", user.id, user.name);
    Ok(Json(user.into()))
}
