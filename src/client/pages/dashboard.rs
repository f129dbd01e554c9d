use std::fmt::Write as _;

use tracing::{error, instrument};
use uuid::Uuid;

use crate::{
    blogs::dto::BlogResponse,
    client::{
        api::{BlogApi, ImageFile, NewPost},
        error::ClientError,
        notify::Notifier,
        store::ClientStore,
    },
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    Post,
    #[default]
    List,
}

#[derive(Debug, Clone, Default)]
pub struct PostForm {
    pub title: String,
    pub category: String,
    pub description: String,
    pub image: Option<ImageFile>,
}

/// Post form plus the signed-in user's view of all blogs.
#[derive(Debug, Default)]
pub struct Dashboard {
    pub tab: Tab,
    pub form: PostForm,
    blogs: Vec<BlogResponse>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, name: &str, value: &str) {
        match name {
            "title" => self.form.title = value.to_string(),
            "category" => self.form.category = value.to_string(),
            "description" => self.form.description = value.to_string(),
            _ => {}
        }
    }

    pub fn set_image(&mut self, image: ImageFile) {
        self.form.image = Some(image);
    }

    pub fn blogs(&self) -> &[BlogResponse] {
        &self.blogs
    }

    #[instrument(skip_all)]
    pub async fn submit_post(
        &mut self,
        api: &dyn BlogApi,
        store: &ClientStore,
        notifier: &mut Notifier,
    ) {
        let Some(token) = store.token() else {
            notifier.error(ClientError::NotLoggedIn.user_message("Something went wrong"));
            return;
        };
        let post = NewPost {
            title: self.form.title.clone(),
            category: self.form.category.clone(),
            description: self.form.description.clone(),
            image: self.form.image.clone(),
        };
        match api.create_blog(token, post).await {
            Ok(res) => {
                notifier.success(res.message);
                self.form = PostForm::default();
                self.tab = Tab::List;
            }
            Err(e) => notifier.error(e.user_message("Something went wrong")),
        }
    }

    /// Reloads the list with the stored token. On failure the old list stays.
    #[instrument(skip_all)]
    pub async fn fetch_blogs(
        &mut self,
        api: &dyn BlogApi,
        store: &ClientStore,
        notifier: &mut Notifier,
    ) {
        match api.list_blogs(store.token()).await {
            Ok(blogs) => self.blogs = blogs,
            Err(e) => {
                error!(error = %e, "failed to fetch blogs");
                notifier.error(e.user_message("Failed to load blogs"));
            }
        }
    }

    #[instrument(skip(self, api, store, notifier))]
    pub async fn remove_blog(
        &mut self,
        api: &dyn BlogApi,
        store: &ClientStore,
        notifier: &mut Notifier,
        id: Uuid,
    ) {
        let Some(token) = store.token() else {
            notifier.error(ClientError::NotLoggedIn.user_message("Failed to delete"));
            return;
        };
        match api.delete_blog(token, id).await {
            Ok(res) => {
                notifier.success(res.message);
                self.blogs.retain(|b| b.id != id);
            }
            Err(e) => notifier.error(e.user_message("Failed to delete")),
        }
    }

    pub fn render(&self, store: &ClientStore) -> String {
        let mut out = String::new();
        let marker = |tab: Tab| if self.tab == tab { "*" } else { " " };
        let _ = writeln!(out, "[{}] Post  [{}] List", marker(Tab::Post), marker(Tab::List));
        match self.tab {
            Tab::Post => {
                let _ = writeln!(out, "title:       {}", self.form.title);
                let _ = writeln!(out, "category:    {}", self.form.category);
                let _ = writeln!(out, "description: {}", self.form.description);
                let image = self
                    .form
                    .image
                    .as_ref()
                    .map_or("(none)", |i| i.file_name.as_str());
                let _ = writeln!(out, "image:       {image}");
            }
            Tab::List if self.blogs.is_empty() => {
                let _ = writeln!(out, "No blogs yet.");
            }
            Tab::List => {
                for blog in &self.blogs {
                    let _ = writeln!(
                        out,
                        "{}  {} [{}]  {}",
                        blog.id,
                        blog.title,
                        blog.category,
                        store.image_url(&blog.image)
                    );
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        client::{
            api::HttpApi, notify::ToastKind, pages::fixtures::setup, session::LocalStorage,
            testing::png,
        },
        users::dto::{LoginRequest, RegisterRequest},
    };

    async fn signed_in(api: &dyn BlogApi, store: &mut ClientStore) {
        api.register(&RegisterRequest {
            email: "a@x.com".into(),
            password: "pw".into(),
            name: "A".into(),
        })
        .await
        .unwrap();
        let res = api
            .login(&LoginRequest {
                email: "a@x.com".into(),
                password: "pw".into(),
            })
            .await
            .unwrap();
        store.login_user(res.user, res.token).unwrap();
    }

    fn filled(dash: &mut Dashboard) {
        dash.tab = Tab::Post;
        dash.set_field("title", "Hi");
        dash.set_field("category", "news");
        dash.set_field("description", "d");
        dash.set_image(png());
    }

    #[test]
    fn starts_on_list_tab() {
        assert_eq!(Dashboard::new().tab, Tab::List);
    }

    #[tokio::test]
    async fn post_fetch_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let (api, mut store) = setup(&dir).await;
        signed_in(&api, &mut store).await;

        let mut dash = Dashboard::new();
        let mut notifier = Notifier::default();
        filled(&mut dash);
        dash.submit_post(&api, &store, &mut notifier).await;

        assert_eq!(notifier.last().unwrap().message, "Blog created successfully");
        assert_eq!(dash.tab, Tab::List);
        assert!(dash.form.title.is_empty());
        assert!(dash.form.image.is_none());

        dash.fetch_blogs(&api, &store, &mut notifier).await;
        assert_eq!(dash.blogs().len(), 1);
        assert!(dash.render(&store).contains("Hi [news]"));

        let id = dash.blogs()[0].id;
        dash.remove_blog(&api, &store, &mut notifier, id).await;
        assert_eq!(notifier.last().unwrap().kind, ToastKind::Success);
        assert!(dash.blogs().is_empty());
    }

    #[tokio::test]
    async fn post_without_image_reports_server_message() {
        let dir = tempfile::tempdir().unwrap();
        let (api, mut store) = setup(&dir).await;
        signed_in(&api, &mut store).await;

        let mut dash = Dashboard::new();
        let mut notifier = Notifier::default();
        filled(&mut dash);
        dash.form.image = None;
        dash.submit_post(&api, &store, &mut notifier).await;

        let toast = notifier.last().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "image is required");
        assert_eq!(dash.tab, Tab::Post);
        assert_eq!(dash.form.title, "Hi");
    }

    #[tokio::test]
    async fn post_requires_session() {
        let dir = tempfile::tempdir().unwrap();
        let (api, store) = setup(&dir).await;

        let mut dash = Dashboard::new();
        let mut notifier = Notifier::default();
        filled(&mut dash);
        dash.submit_post(&api, &store, &mut notifier).await;
        assert_eq!(notifier.last().unwrap().kind, ToastKind::Error);
    }

    #[tokio::test]
    async fn unreachable_server_on_fetch_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // nothing listens on port 9 locally
        let api = HttpApi::new("http://127.0.0.1:9");
        let store = ClientStore::restore(
            api.base_url(),
            LocalStorage::open(dir.path().join("s.json")).unwrap(),
        );

        let mut dash = Dashboard::new();
        let mut notifier = Notifier::default();
        dash.fetch_blogs(&api, &store, &mut notifier).await;

        assert!(dash.blogs().is_empty());
        let toast = notifier.last().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Failed to load blogs");
    }

    #[tokio::test]
    async fn deleting_unknown_blog_keeps_list() {
        let dir = tempfile::tempdir().unwrap();
        let (api, mut store) = setup(&dir).await;
        signed_in(&api, &mut store).await;

        let mut dash = Dashboard::new();
        let mut notifier = Notifier::default();
        dash.remove_blog(&api, &store, &mut notifier, Uuid::new_v4())
            .await;
        let toast = notifier.last().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Blog not found");
    }
}
