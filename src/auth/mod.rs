use axum::{routing::post, Router};
use rand::Rng;
use sqlx::SqliteConnection;

use crate::{db::User, AppError, AppResult, AppState};

mod key;
mod login;
mod signup;

pub use key::AuthUser;

pub(crate) const DIGITS: &[u8] = b"0123456789";
pub(crate) const LOWER_ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup::signup))
        .route("/login", post(login::login))
}

/// Draws `len` characters from `charset`.
///
/// `rand::rng()` is a ChaCha-based CSPRNG seeded from the OS, which matters
/// here because an api key is the only thing standing between a caller and
/// someone else's account.
pub(crate) fn random_string(charset: &[u8], len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| charset[rng.random_range(0..charset.len())] as char)
        .collect()
}

pub(crate) async fn create_user(conn: &mut SqliteConnection) -> AppResult<User> {
    let name = format!("Unnamed User #{}", random_string(DIGITS, 6));
    let password = random_string(LOWER_ALPHANUMERIC, 10);
    let api_key = random_string(LOWER_ALPHANUMERIC, 40);

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (name,password,api_key) VALUES (?,?,?) RETURNING id,name,password,api_key",
    )
    .bind(name)
    .bind(password)
    .bind(api_key)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| AppError::internal("Failed to create user"))?;

    tracing::info!("adding u/{} {}", user.id, user.name);
    Ok(user)
}

/// Plain equality on name and stored password.
pub(crate) async fn authenticate(
    conn: &mut SqliteConnection,
    name: &str,
    password: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT id,name,password,api_key FROM users WHERE name=? AND password=?")
        .bind(name)
        .bind(password)
        .fetch_optional(conn)
        .await
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn random_strings_stay_in_charset() {
        let key = random_string(LOWER_ALPHANUMERIC, 40);
        assert_eq!(key.len(), 40);
        assert!(key.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));

        let digits = random_string(DIGITS, 6);
        assert_eq!(digits.len(), 6);
        assert!(digits.bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn keys_dont_repeat() {
        let keys: HashSet<_> = (0..1000).map(|_| random_string(LOWER_ALPHANUMERIC, 40)).collect();
        assert_eq!(keys.len(), 1000);
    }
}
