use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Validated input for a new blog post.
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub category: String,
    pub description: String,
    pub image: String, // filename returned by the upload handler
    pub author_id: Uuid,
}

/// Blog joined with its author's public fields.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct BlogWithAuthor {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub description: String,
    pub image: String,
    pub created_at: OffsetDateTime,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_image: Option<String>,
}
