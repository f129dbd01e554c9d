use tracing::{info, warn};
use uuid::Uuid;

use super::{dto::BlogResponse, repo_types::NewBlog};
use crate::{
    error::{ApiError, ApiResult},
    images::{self, UploadItem},
    state::AppState,
};

/// Fields collected from the create form, before validation.
#[derive(Default)]
pub struct BlogForm {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image: Option<UploadItem>,
}

pub struct ValidBlogForm {
    pub title: String,
    pub category: String,
    pub description: String,
    pub image: UploadItem,
}

fn required(value: Option<String>, field: &str) -> ApiResult<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::validation(format!("{field} is required"))),
    }
}

impl BlogForm {
    pub fn validate(self) -> ApiResult<ValidBlogForm> {
        Ok(ValidBlogForm {
            title: required(self.title, "title")?,
            category: required(self.category, "category")?,
            description: required(self.description, "description")?,
            image: self
                .image
                .ok_or_else(|| ApiError::validation("image is required"))?,
        })
    }
}

/// Malformed ids cannot name a stored blog, so they are reported as missing.
pub fn parse_blog_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound("Blog not found".into()))
}

pub async fn create_blog(
    state: &AppState,
    author_id: Uuid,
    form: ValidBlogForm,
) -> ApiResult<BlogResponse> {
    if state.repo.find_user_by_id(author_id).await?.is_none() {
        warn!(%author_id, "token names an unknown user");
        return Err(ApiError::unauthorized("User not found"));
    }

    let image = images::store_image(
        state.storage.as_ref(),
        state.config.max_image_bytes,
        form.image,
    )
    .await?;

    let inserted = state
        .repo
        .insert_blog(NewBlog {
            title: form.title,
            category: form.category,
            description: form.description,
            image: image.clone(),
            author_id,
        })
        .await;

    match inserted {
        Ok(blog) => {
            info!(blog_id = %blog.id, %author_id, "blog created");
            Ok(blog.into())
        }
        Err(e) => {
            images::discard_image(state.storage.as_ref(), &image).await;
            Err(e.into())
        }
    }
}

pub async fn list_blogs(state: &AppState) -> ApiResult<Vec<BlogResponse>> {
    let rows = state.repo.list_blogs().await?;
    Ok(rows.into_iter().map(BlogResponse::from).collect())
}

pub async fn get_blog(state: &AppState, id: Uuid) -> ApiResult<BlogResponse> {
    state
        .repo
        .find_blog(id)
        .await?
        .map(BlogResponse::from)
        .ok_or_else(|| ApiError::NotFound("Blog not found".into()))
}

/// Removes a blog. Any authenticated user may delete any blog; the image file stays on disk.
pub async fn delete_blog(state: &AppState, user_id: Uuid, id: Uuid) -> ApiResult<()> {
    if !state.repo.delete_blog(id).await? {
        return Err(ApiError::NotFound("Blog not found".into()));
    }
    info!(blog_id = %id, %user_id, "blog deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::{dto::RegisterRequest, services as users};
    use bytes::Bytes;

    fn form(title: &str) -> BlogForm {
        BlogForm {
            title: Some(title.into()),
            category: Some("news".into()),
            description: Some("d".into()),
            image: Some(UploadItem {
                body: Bytes::from_static(b"\x89PNG"),
                content_type: "image/png".into(),
            }),
        }
    }

    async fn author(state: &AppState) -> Uuid {
        let input = users::validate_registration(RegisterRequest {
            email: "a@x.com".into(),
            password: "pw".into(),
            name: "A".into(),
        })
        .unwrap();
        users::register(state.repo.as_ref(), input).await.unwrap().id
    }

    #[test]
    fn validation_reports_first_missing_field() {
        let mut f = form("t");
        f.title = Some("   ".into());
        match f.validate() {
            Err(ApiError::Validation(msg)) => assert_eq!(msg, "title is required"),
            _ => panic!("expected validation error"),
        }

        let mut f = form("t");
        f.image = None;
        assert!(matches!(f.validate(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn malformed_id_is_not_found() {
        assert!(matches!(
            parse_blog_id("not-a-uuid"),
            Err(ApiError::NotFound(_))
        ));
        let id = Uuid::new_v4();
        assert_eq!(parse_blog_id(&id.to_string()).unwrap(), id);
    }

    #[tokio::test]
    async fn created_blog_is_listed_and_fetchable() {
        let state = AppState::fake();
        let author_id = author(&state).await;

        let created = create_blog(&state, author_id, form("Hi").validate().unwrap())
            .await
            .unwrap();
        assert_eq!(created.author.id, author_id);

        let all = list_blogs(&state).await.unwrap();
        assert_eq!(all, vec![created.clone()]);
        assert_eq!(get_blog(&state, created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn unknown_author_is_rejected_without_storing_image() {
        let state = AppState::fake();
        let err = create_blog(&state, Uuid::new_v4(), form("Hi").validate().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn delete_missing_blog_is_not_found() {
        let state = AppState::fake();
        let author_id = author(&state).await;
        let err = delete_blog(&state, author_id, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_blog_from_list() {
        let state = AppState::fake();
        let author_id = author(&state).await;
        let blog = create_blog(&state, author_id, form("Hi").validate().unwrap())
            .await
            .unwrap();

        delete_blog(&state, author_id, blog.id).await.unwrap();
        assert!(list_blogs(&state).await.unwrap().is_empty());
        assert!(matches!(
            get_blog(&state, blog.id).await,
            Err(ApiError::NotFound(_))
        ));
    }
}
