use axum::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    blogs::repo_types::{BlogWithAuthor, NewBlog},
    users::repo_types::{NewUser, User},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

#[derive(Debug, Error)]
pub enum DbError {
    /// A unique constraint rejected the write.
    #[error("duplicate {0}")]
    Duplicate(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                let what = db_err.constraint().unwrap_or("record").to_string();
                return DbError::Duplicate(what);
            }
        }
        DbError::Other(err.into())
    }
}

/// Persistence for users and blogs.
#[async_trait]
pub trait Repository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DbError>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, DbError>;
    async fn create_user(&self, user: NewUser) -> Result<User, DbError>;

    async fn insert_blog(&self, blog: NewBlog) -> Result<BlogWithAuthor, DbError>;
    /// All blogs, newest first.
    async fn list_blogs(&self) -> Result<Vec<BlogWithAuthor>, DbError>;
    async fn find_blog(&self, id: Uuid) -> Result<Option<BlogWithAuthor>, DbError>;
    /// Returns `false` when no blog had that id.
    async fn delete_blog(&self, id: Uuid) -> Result<bool, DbError>;
}
