use std::{
    ops::{Deref, DerefMut},
    str::FromStr,
};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use serde::Serialize;
use sqlx::{
    pool::PoolConnection,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    FromRow, Sqlite, SqliteConnection, SqlitePool,
};

use crate::{include_res, AppError};

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub password: String,
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Room {
    #[serde(rename = "room_id")]
    pub id: i64,
    #[serde(rename = "room_name")]
    pub name: String,
}

/// A message with its author's current name joined in.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Message {
    pub id: i64,
    pub author: String,
    pub body: String,
}

/// One pooled connection, held for the lifetime of a request.
///
/// Statements run in autocommit mode, so each one commits on its own. The
/// connection goes back to the pool when the handler's future is dropped,
/// whether it finished, failed or was cancelled.
pub struct Db(PoolConnection<Sqlite>);

impl<S> FromRequestParts<S> for Db
where
    SqlitePool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let db_pool = SqlitePool::from_ref(state);
        Ok(Db(db_pool.acquire().await?))
    }
}

impl Deref for Db {
    type Target = SqliteConnection;

    fn deref(&self) -> &SqliteConnection {
        &*self.0
    }
}

impl DerefMut for Db {
    fn deref_mut(&mut self) -> &mut SqliteConnection {
        &mut *self.0
    }
}

/// Opens the pool, creating the database file and its directory if needed.
pub async fn connect(url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    // sqlite creates the file but not the directory it lives in
    if let Some(dir) = options.get_filename().parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

pub async fn init_schema(db_pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(include_res!(str, "/schema.sql"))
        .execute(db_pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    #[tokio::test]
    async fn connect_creates_missing_directories() {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        let root = std::env::temp_dir().join(format!("watchparty-{}-{nanos}", std::process::id()));
        let file = root.join("db").join("watchparty.sqlite3");
        assert!(!root.exists());

        let db_pool = connect(&format!("sqlite://{}", file.display()), 1).await.unwrap();
        init_schema(&db_pool).await.unwrap();

        let (rooms,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rooms")
            .fetch_one(&db_pool)
            .await
            .unwrap();
        assert_eq!(rooms, 0);
        assert!(file.exists());

        db_pool.close().await;
        std::fs::remove_dir_all(&root).unwrap();
    }

    #[tokio::test]
    async fn connect_in_memory() {
        let db_pool = connect("sqlite::memory:", 1).await.unwrap();
        init_schema(&db_pool).await.unwrap();
    }
}
