//! User persistence operations on the `users` table.

use garage_core::UserId;
use sqlx::SqlitePool;

/// A stored account, as needed for credential checks.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    /// PHC hash string. Rows written by older deployments may hold something else.
    pub password_hash: String,
}

/// Insert a new user and return the assigned id.
pub async fn insert(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
) -> Result<UserId, sqlx::Error> {
    let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
        .bind(username)
        .bind(password_hash)
        .execute(pool)
        .await?;

    Ok(UserId::from_db(result.last_insert_rowid()))
}

/// Fetch a user by exact username.
pub async fn find_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<UserRecord>, sqlx::Error> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, password FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(UserRow::into_record))
}

/// Whether `err` is a violation of a UNIQUE constraint.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    password: Option<String>,
}

impl UserRow {
    fn into_record(self) -> UserRecord {
        UserRecord {
            id: UserId::from_db(self.id),
            password_hash: self.password.unwrap_or_default(),
        }
    }
}
