use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use sqlx::SqlitePool;

use crate::{db::User, AppError};

/// The user owning the request's `Authorization` key.
///
/// The header carries the raw key, no `Bearer` prefix. Taking this as a
/// handler argument is what makes a route protected. It borrows a connection
/// only for the lookup, so list it before [`crate::db::Db`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl<S> FromRequestParts<S> for AuthUser
where
    SqlitePool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(api_key) = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
        else {
            tracing::debug!("{} {}: no api key", parts.method, parts.uri);
            return Err(AppError::Forbidden("API key required".to_owned()));
        };

        let db_pool = SqlitePool::from_ref(state);
        let user = sqlx::query_as::<_, User>("SELECT id,name,password,api_key FROM users WHERE api_key=?")
            .bind(api_key)
            .fetch_optional(&db_pool)
            .await?;

        match user {
            Some(user) => Ok(AuthUser(user)),
            None => {
                tracing::debug!("{} {}: unknown api key", parts.method, parts.uri);
                Err(AppError::Forbidden("Invalid API key".to_owned()))
            }
        }
    }
}
