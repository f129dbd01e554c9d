//! Views driven by `ClientStore` and direct API calls.
//!
//! Each page owns its local form state; results surface through a `Notifier`
//! and, where the page moves elsewhere, an [`Outcome::Navigate`].

pub mod dashboard;
pub mod home;
pub mod login;
pub mod register;
pub mod single_blog;

pub use dashboard::{Dashboard, PostForm, Tab};
pub use home::render_blog_list;
pub use login::{LoginForm, LoginPage};
pub use register::{RegisterForm, RegisterPage};
pub use single_blog::SingleBlogView;

/// What the front end should do after a page action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Stay,
    Navigate(&'static str),
}
