//! Terminal front end for the blog API: an HTTP client, a persisted session
//! store and the pages built on them.

pub mod api;
pub mod error;
pub mod notify;
pub mod pages;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{BlogApi, HttpApi, ImageFile, NewPost, DEFAULT_API_URL};
pub use error::ClientError;
pub use notify::{Notifier, Toast, ToastKind};
pub use session::LocalStorage;
pub use store::ClientStore;
