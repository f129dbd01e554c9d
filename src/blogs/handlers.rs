use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        DefaultBodyLimit, Multipart, Path, State,
    },
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{BlogCreatedResponse, BlogDetailResponse, BlogListResponse},
    services::{self, BlogForm},
};
use crate::{
    auth::AuthUser,
    error::{ApiError, ApiResult},
    images::{UploadItem, IMAGE_FIELD},
    state::AppState,
    users::dto::MessageResponse,
};

/// Room for the text fields next to the image.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/all", get(list_blogs))
        .route("/:id", get(get_blog))
}

pub fn write_routes(max_image_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/create", post(create_blog))
        .layer(DefaultBodyLimit::max(max_image_bytes + FORM_OVERHEAD_BYTES))
        .route("/delete/:id", delete(delete_blog))
}

#[instrument(skip(state))]
pub async fn list_blogs(State(state): State<AppState>) -> ApiResult<Json<BlogListResponse>> {
    let blogs = services::list_blogs(&state).await?;
    Ok(Json(BlogListResponse {
        success: true,
        blogs,
    }))
}

#[instrument(skip(state))]
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<BlogDetailResponse>> {
    let id = services::parse_blog_id(&id)?;
    let blog = services::get_blog(&state, id).await?;
    Ok(Json(BlogDetailResponse {
        success: true,
        blog,
    }))
}

/// POST /blog/create (multipart: title, category, description, image)
#[instrument(skip(state, mp))]
pub async fn create_blog(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    mp: Result<Multipart, MultipartRejection>,
) -> ApiResult<(StatusCode, HeaderMap, Json<BlogCreatedResponse>)> {
    let form = read_blog_form(mp?, state.config.max_image_bytes)
        .await?
        .validate()?;
    let blog = services::create_blog(&state, user_id, form).await?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/blog/{}", blog.id)) {
        headers.insert(header::LOCATION, location);
    }

    Ok((
        StatusCode::CREATED,
        headers,
        Json(BlogCreatedResponse {
            success: true,
            message: "Blog created successfully".into(),
            blog,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn delete_blog(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = services::parse_blog_id(&id)?;
    services::delete_blog(&state, user_id, id).await?;
    Ok(Json(MessageResponse::ok("Blog deleted successfully")))
}

/// Body-limit overruns surface as a size error instead of a stream failure.
fn upload_error(err: MultipartError, max_image_bytes: usize) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::validation(format!("Image exceeds {max_image_bytes} bytes"))
    } else {
        err.into()
    }
}

async fn read_blog_form(mut mp: Multipart, max_image_bytes: usize) -> ApiResult<BlogForm> {
    let fail = |e: MultipartError| upload_error(e, max_image_bytes);
    let mut form = BlogForm::default();
    while let Some(field) = mp.next_field().await.map_err(fail)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => form.title = Some(field.text().await.map_err(fail)?),
            "category" => form.category = Some(field.text().await.map_err(fail)?),
            "description" => form.description = Some(field.text().await.map_err(fail)?),
            n if n == IMAGE_FIELD => {
                if form.image.is_some() {
                    return Err(ApiError::validation("Only one image may be uploaded"));
                }
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".into());
                let body = field.bytes().await.map_err(fail)?;
                form.image = Some(UploadItem { body, content_type });
            }
            _ => {}
        }
    }
    Ok(form)
}
