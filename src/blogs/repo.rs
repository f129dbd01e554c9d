use sqlx::PgPool;
use uuid::Uuid;

use crate::blogs::repo_types::{BlogWithAuthor, NewBlog};

const SELECT_WITH_AUTHOR: &str = r#"
    SELECT b.id, b.title, b.category, b.description, b.image, b.created_at,
           u.id AS author_id, u.name AS author_name, u.image AS author_image
    FROM blogs b
    JOIN users u ON u.id = b.author_id
"#;

pub async fn insert(db: &PgPool, new: &NewBlog) -> sqlx::Result<BlogWithAuthor> {
    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO blogs (title, category, description, image, author_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(&new.title)
    .bind(&new.category)
    .bind(&new.description)
    .bind(&new.image)
    .bind(new.author_id)
    .fetch_one(db)
    .await?;

    sqlx::query_as::<_, BlogWithAuthor>(&format!("{SELECT_WITH_AUTHOR} WHERE b.id = $1"))
        .bind(id)
        .fetch_one(db)
        .await
}

/// Every blog, newest first.
pub async fn list_all(db: &PgPool) -> sqlx::Result<Vec<BlogWithAuthor>> {
    sqlx::query_as::<_, BlogWithAuthor>(&format!(
        "{SELECT_WITH_AUTHOR} ORDER BY b.created_at DESC, b.id DESC"
    ))
    .fetch_all(db)
    .await
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<BlogWithAuthor>> {
    sqlx::query_as::<_, BlogWithAuthor>(&format!("{SELECT_WITH_AUTHOR} WHERE b.id = $1"))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn delete_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<bool> {
    let res = sqlx::query("DELETE FROM blogs WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}
