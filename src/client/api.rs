use std::path::Path;

use anyhow::Context;
use axum::async_trait;
use reqwest::{multipart, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;
use uuid::Uuid;

use super::error::ClientError;
use crate::{
    blogs::dto::{BlogCreatedResponse, BlogListResponse, BlogResponse},
    users::dto::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest},
};

pub const DEFAULT_API_URL: &str = "http://localhost:4000";

/// An image picked for upload.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read image {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();
        let content_type = match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            Some("gif") => "image/gif",
            _ => "application/octet-stream",
        };
        Ok(Self {
            file_name,
            content_type: content_type.to_string(),
            bytes,
        })
    }
}

/// Fields of a new post, as sent by the dashboard.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub category: String,
    pub description: String,
    pub image: Option<ImageFile>,
}

/// Calls the pages make against the backend.
#[async_trait]
pub trait BlogApi: Send + Sync {
    fn base_url(&self) -> &str;
    async fn register(&self, req: &RegisterRequest) -> Result<MessageResponse, ClientError>;
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ClientError>;
    async fn list_blogs(&self, token: Option<&str>) -> Result<Vec<BlogResponse>, ClientError>;
    async fn create_blog(
        &self,
        token: &str,
        post: NewPost,
    ) -> Result<BlogCreatedResponse, ClientError>;
    async fn delete_blog(&self, token: &str, id: Uuid) -> Result<MessageResponse, ClientError>;
}

/// `BlogApi` over HTTP.
#[derive(Clone)]
pub struct HttpApi {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, ClientError> {
        let res = req.send().await?;
        Self::decode(res).await
    }

    async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, ClientError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res.json::<T>().await?);
        }
        let message = res
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|b| b.message);
        debug!(status = status.as_u16(), ?message, "request rejected");
        Err(ClientError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl BlogApi for HttpApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn register(&self, req: &RegisterRequest) -> Result<MessageResponse, ClientError> {
        Self::send(self.http.post(self.url("/user/register")).json(req)).await
    }

    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ClientError> {
        Self::send(self.http.post(self.url("/user/login")).json(req)).await
    }

    async fn list_blogs(&self, token: Option<&str>) -> Result<Vec<BlogResponse>, ClientError> {
        let mut req = self.http.get(self.url("/blog/all"));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        let body: BlogListResponse = Self::send(req).await?;
        Ok(body.blogs)
    }

    async fn create_blog(
        &self,
        token: &str,
        post: NewPost,
    ) -> Result<BlogCreatedResponse, ClientError> {
        let mut form = multipart::Form::new()
            .text("title", post.title)
            .text("category", post.category)
            .text("description", post.description);
        if let Some(image) = post.image {
            let part = multipart::Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.content_type)?;
            form = form.part("image", part);
        }
        Self::send(
            self.http
                .post(self.url("/blog/create"))
                .bearer_auth(token)
                .multipart(form),
        )
        .await
    }

    async fn delete_blog(&self, token: &str, id: Uuid) -> Result<MessageResponse, ClientError> {
        Self::send(
            self.http
                .delete(self.url(&format!("/blog/delete/{id}")))
                .bearer_auth(token),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{png, spawn_server};

    #[test]
    fn image_type_follows_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Cover.JPG");
        std::fs::write(&path, b"jpeg").unwrap();
        let image = ImageFile::from_path(&path).unwrap();
        assert_eq!(image.content_type, "image/jpeg");
        assert_eq!(image.file_name, "Cover.JPG");
        assert_eq!(image.bytes, b"jpeg");
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let api = HttpApi::new("http://localhost:4000/");
        assert_eq!(api.base_url(), "http://localhost:4000");
    }

    #[tokio::test]
    async fn end_to_end_against_live_server() {
        let api = HttpApi::new(spawn_server().await);

        api.register(&RegisterRequest {
            email: "a@x.com".into(),
            password: "pw".into(),
            name: "A".into(),
        })
        .await
        .unwrap();

        let login = api
            .login(&LoginRequest {
                email: "a@x.com".into(),
                password: "pw".into(),
            })
            .await
            .unwrap();
        assert!(login.success);

        let created = api
            .create_blog(
                &login.token,
                NewPost {
                    title: "Hi".into(),
                    category: "news".into(),
                    description: "d".into(),
                    image: Some(png()),
                },
            )
            .await
            .unwrap();

        let blogs = api.list_blogs(None).await.unwrap();
        assert_eq!(blogs, vec![created.blog.clone()]);

        api.delete_blog(&login.token, created.blog.id).await.unwrap();
        assert!(api.list_blogs(Some(&login.token)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn server_errors_carry_message() {
        let api = HttpApi::new(spawn_server().await);
        let err = api
            .login(&LoginRequest {
                email: "nobody@x.com".into(),
                password: "pw".into(),
            })
            .await
            .unwrap_err();
        match err {
            ClientError::Server { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message.as_deref(), Some("Invalid credentials"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_without_valid_token_is_rejected() {
        let api = HttpApi::new(spawn_server().await);
        let err = api
            .create_blog(
                "bogus",
                NewPost {
                    title: "Hi".into(),
                    category: "news".into(),
                    description: "d".into(),
                    image: Some(png()),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Server { status: 401, .. }));
    }
}
