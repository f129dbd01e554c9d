use tracing::{info, warn};
use uuid::Uuid;

use super::{api::BlogApi, error::ClientError, session::LocalStorage};
use crate::{blogs::dto::BlogResponse, users::dto::PublicUser};

const USER_KEY: &str = "user";
const TOKEN_KEY: &str = "token";

/// Client-side application state shared by the pages.
pub struct ClientStore {
    api_url: String,
    user: Option<PublicUser>,
    token: Option<String>,
    blogs: Vec<BlogResponse>,
    storage: LocalStorage,
}

impl ClientStore {
    /// Restores the persisted session and fetches the public blog list once.
    pub async fn init(api: &dyn BlogApi, storage: LocalStorage) -> Self {
        let mut store = Self::restore(api.base_url(), storage);
        if let Err(e) = store.refresh_blogs(api).await {
            warn!(error = %e, "error in all blogs api");
        }
        store
    }

    /// Restores user and token from persisted storage without any network call.
    pub fn restore(api_url: &str, storage: LocalStorage) -> Self {
        let user = storage
            .get_item(USER_KEY)
            .and_then(|raw| match serde_json::from_str::<PublicUser>(raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "ignoring unreadable stored user");
                    None
                }
            });
        let token = storage.get_item(TOKEN_KEY).map(str::to_string);
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            user,
            token,
            blogs: Vec::new(),
            storage,
        }
    }

    pub async fn refresh_blogs(&mut self, api: &dyn BlogApi) -> Result<(), ClientError> {
        self.blogs = api.list_blogs(None).await?;
        Ok(())
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn image_url(&self, file: &str) -> String {
        format!("{}/images/{}", self.api_url, file)
    }

    pub fn user(&self) -> Option<&PublicUser> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn blogs(&self) -> &[BlogResponse] {
        &self.blogs
    }

    pub fn find_blog(&self, id: Uuid) -> Option<&BlogResponse> {
        self.blogs.iter().find(|b| b.id == id)
    }

    pub fn login_user(&mut self, user: PublicUser, token: String) -> Result<(), ClientError> {
        let raw = serde_json::to_string(&user).map_err(anyhow::Error::from)?;
        self.storage.set_item(USER_KEY, raw)?;
        self.storage.set_item(TOKEN_KEY, token.clone())?;
        info!(user_id = %user.id, "session stored");
        self.user = Some(user);
        self.token = Some(token);
        Ok(())
    }

    pub fn logout_user(&mut self) -> Result<(), ClientError> {
        self.user = None;
        self.token = None;
        self.storage.remove_item(USER_KEY)?;
        self.storage.remove_item(TOKEN_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{api::HttpApi, testing::spawn_server};

    fn user() -> PublicUser {
        PublicUser {
            id: Uuid::new_v4(),
            name: "A".into(),
            email: "a@x.com".into(),
            image: None,
        }
    }

    #[test]
    fn login_persists_and_restores() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut store = ClientStore::restore("http://api", LocalStorage::open(&path).unwrap());
        assert!(store.user().is_none());
        let u = user();
        store.login_user(u.clone(), "tok".into()).unwrap();

        let restored = ClientStore::restore("http://api", LocalStorage::open(&path).unwrap());
        assert_eq!(restored.user(), Some(&u));
        assert_eq!(restored.token(), Some("tok"));
    }

    #[test]
    fn logout_clears_persisted_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut store = ClientStore::restore("http://api", LocalStorage::open(&path).unwrap());
        store.login_user(user(), "tok".into()).unwrap();
        store.logout_user().unwrap();
        assert!(store.user().is_none());

        let restored = ClientStore::restore("http://api", LocalStorage::open(&path).unwrap());
        assert!(restored.user().is_none());
        assert!(restored.token().is_none());
    }

    #[test]
    fn image_urls_point_at_static_route() {
        let dir = tempfile::tempdir().unwrap();
        let store = ClientStore::restore(
            "http://api:4000/",
            LocalStorage::open(dir.path().join("s.json")).unwrap(),
        );
        assert_eq!(store.image_url("1-a.png"), "http://api:4000/images/1-a.png");
    }

    #[tokio::test]
    async fn init_fetches_blogs_and_tolerates_unreachable_server() {
        let dir = tempfile::tempdir().unwrap();

        let api = HttpApi::new(spawn_server().await);
        let store = ClientStore::init(&api, LocalStorage::open(dir.path().join("a.json")).unwrap()).await;
        assert!(store.blogs().is_empty());

        // nothing listens on port 9 locally
        let dead = HttpApi::new("http://127.0.0.1:9");
        let store = ClientStore::init(&dead, LocalStorage::open(dir.path().join("b.json")).unwrap()).await;
        assert!(store.blogs().is_empty());
    }
}
