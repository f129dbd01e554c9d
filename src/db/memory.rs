use anyhow::anyhow;
use axum::async_trait;
use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DbError, Repository};
use crate::{
    blogs::repo_types::{BlogWithAuthor, NewBlog},
    users::repo_types::{NewUser, User},
};

#[derive(Debug, Clone)]
struct StoredBlog {
    id: Uuid,
    title: String,
    category: String,
    description: String,
    image: String,
    author_id: Uuid,
    created_at: OffsetDateTime,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    blogs: Vec<StoredBlog>,
    last_created: Option<OffsetDateTime>,
}

impl Tables {
    /// Creation timestamps are strictly increasing so ordering stays deterministic.
    fn next_timestamp(&mut self) -> OffsetDateTime {
        let now = OffsetDateTime::now_utc();
        let ts = match self.last_created {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created = Some(ts);
        ts
    }

    fn join(&self, blog: &StoredBlog) -> Option<BlogWithAuthor> {
        let author = self.users.iter().find(|u| u.id == blog.author_id)?;
        Some(BlogWithAuthor {
            id: blog.id,
            title: blog.title.clone(),
            category: blog.category.clone(),
            description: blog.description.clone(),
            image: blog.image.clone(),
            created_at: blog.created_at,
            author_id: author.id,
            author_name: author.name.clone(),
            author_image: author.image.clone(),
        })
    }
}

/// In-process repository used by tests and `AppState::fake`.
#[derive(Default)]
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, DbError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(DbError::Duplicate("users_email_key".into()));
        }
        let created_at = tables.next_timestamp();
        let user = User {
            id: Uuid::new_v4(),
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
            image: None,
            created_at,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn insert_blog(&self, blog: NewBlog) -> Result<BlogWithAuthor, DbError> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|u| u.id == blog.author_id) {
            return Err(DbError::Other(anyhow!(
                "author {} does not exist",
                blog.author_id
            )));
        }
        let created_at = tables.next_timestamp();
        let stored = StoredBlog {
            id: Uuid::new_v4(),
            title: blog.title,
            category: blog.category,
            description: blog.description,
            image: blog.image,
            author_id: blog.author_id,
            created_at,
        };
        tables.blogs.push(stored.clone());
        tables
            .join(&stored)
            .ok_or_else(|| DbError::Other(anyhow!("author vanished during insert")))
    }

    async fn list_blogs(&self) -> Result<Vec<BlogWithAuthor>, DbError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<BlogWithAuthor> =
            tables.blogs.iter().filter_map(|b| tables.join(b)).collect();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(rows)
    }

    async fn find_blog(&self, id: Uuid) -> Result<Option<BlogWithAuthor>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .blogs
            .iter()
            .find(|b| b.id == id)
            .and_then(|b| tables.join(b)))
    }

    async fn delete_blog(&self, id: Uuid) -> Result<bool, DbError> {
        let mut tables = self.tables.write().await;
        let before = tables.blogs.len();
        tables.blogs.retain(|b| b.id != id);
        Ok(tables.blogs.len() != before)
    }
}
