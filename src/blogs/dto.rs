use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::BlogWithAuthor;

/// Author fields joined into every blog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub description: String,
    pub image: String,
    pub author: AuthorSummary,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<BlogWithAuthor> for BlogResponse {
    fn from(r: BlogWithAuthor) -> Self {
        Self {
            id: r.id,
            title: r.title,
            category: r.category,
            description: r.description,
            image: r.image,
            author: AuthorSummary {
                id: r.author_id,
                name: r.author_name,
                image: r.author_image,
            },
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogListResponse {
    pub success: bool,
    pub blogs: Vec<BlogResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogDetailResponse {
    pub success: bool,
    pub blog: BlogResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogCreatedResponse {
    pub success: bool,
    pub message: String,
    pub blog: BlogResponse,
}
