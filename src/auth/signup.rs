use axum::{debug_handler, Json};
use serde::Serialize;

use crate::{db::{Db, User}, AppResult, AppState};

use super::create_user;

#[derive(Debug, Serialize)]
pub(crate) struct Credentials {
    user_id: i64,
    user_name: String,
    api_key: String,
}

impl From<User> for Credentials {
    fn from(user: User) -> Self {
        Credentials {
            user_id: user.id,
            user_name: user.name,
            api_key: user.api_key,
        }
    }
}

#[debug_handler(state = AppState)]
pub(crate) async fn signup(mut db: Db) -> AppResult<Json<Credentials>> {
    let user = create_user(&mut db).await?;
    Ok(Json(user.into()))
}
