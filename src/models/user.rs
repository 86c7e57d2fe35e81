use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// An account record as stored in the database.
///
/// Carries the bcrypt password hash, so it is never serialized; responses
/// expose at most the username.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// The fields required to persist a new account.
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
