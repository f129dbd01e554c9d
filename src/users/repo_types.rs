use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String, // stored trimmed and lower-cased
    pub name: String,
    pub password_hash: String, // Argon2 hash, never leaves the server
    pub image: Option<String>, // avatar filename under the upload dir
    pub created_at: OffsetDateTime,
}

/// Validated input for a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}
