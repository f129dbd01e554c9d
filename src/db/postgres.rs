use anyhow::Context;
use axum::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use super::{DbError, Repository};
use crate::{
    blogs::{
        repo as blog_repo,
        repo_types::{BlogWithAuthor, NewBlog},
    },
    users::repo_types::{NewUser, User},
};

#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("connect to database")?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("run migrations")?;
        Ok(())
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        Ok(User::find_by_email(&self.pool, email).await?)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, DbError> {
        Ok(User::find_by_id(&self.pool, id).await?)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, DbError> {
        Ok(User::create(&self.pool, &user).await?)
    }

    async fn insert_blog(&self, blog: NewBlog) -> Result<BlogWithAuthor, DbError> {
        Ok(blog_repo::insert(&self.pool, &blog).await?)
    }

    async fn list_blogs(&self) -> Result<Vec<BlogWithAuthor>, DbError> {
        Ok(blog_repo::list_all(&self.pool).await?)
    }

    async fn find_blog(&self, id: Uuid) -> Result<Option<BlogWithAuthor>, DbError> {
        Ok(blog_repo::find_by_id(&self.pool, id).await?)
    }

    async fn delete_blog(&self, id: Uuid) -> Result<bool, DbError> {
        Ok(blog_repo::delete_by_id(&self.pool, id).await?)
    }
}
