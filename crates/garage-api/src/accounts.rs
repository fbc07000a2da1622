//! # Accounts
//!
//! Registration and credential checks over [`crate::db::users`]. Argon2 is
//! CPU-bound, so hashing and verification run on the blocking pool.

use garage_core::password::{hash_password, verify_password};
use garage_core::{Credentials, PasswordError, UserId};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::db::users;

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("username already registered")]
    DuplicateUsername,

    #[error("unknown username or wrong password")]
    InvalidCredentials,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("account storage failed: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("password task failed: {0}")]
    Task(String),
}

/// Create an account and return its id.
pub async fn register(pool: &SqlitePool, credentials: &Credentials) -> Result<UserId, AccountError> {
    let password = credentials.password().to_owned();
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AccountError::Task(e.to_string()))??;

    match users::insert(pool, credentials.username(), &hash).await {
        Ok(id) => {
            tracing::info!(user_id = %id, "user registered");
            Ok(id)
        }
        Err(e) if users::is_unique_violation(&e) => Err(AccountError::DuplicateUsername),
        Err(e) => Err(AccountError::Storage(e)),
    }
}

/// Check credentials and return the matching user's id.
pub async fn verify(pool: &SqlitePool, credentials: &Credentials) -> Result<UserId, AccountError> {
    let Some(user) = users::find_by_username(pool, credentials.username()).await? else {
        return Err(AccountError::InvalidCredentials);
    };

    let password = credentials.password().to_owned();
    let stored = user.password_hash;
    let verified = tokio::task::spawn_blocking(move || verify_password(&password, &stored))
        .await
        .map_err(|e| AccountError::Task(e.to_string()))?;

    match verified {
        Ok(true) => Ok(user.id),
        Ok(false) => Err(AccountError::InvalidCredentials),
        Err(PasswordError::MalformedHash(detail)) => {
            tracing::warn!(user_id = %user.id, detail = %detail, "stored password is not a valid hash");
            Err(AccountError::InvalidCredentials)
        }
        Err(e) => Err(e.into()),
    }
}
