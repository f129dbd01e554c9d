use std::fmt::Write as _;

use time::{macros::format_description, OffsetDateTime};
use uuid::Uuid;

use crate::{blogs::dto::BlogResponse, client::store::ClientStore};

const DEFAULT_AVATAR: &str = "/default-avatar.png";

/// One blog, looked up in the list the store already holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SingleBlogView<'a> {
    Loading,
    Loaded(&'a BlogResponse),
}

impl<'a> SingleBlogView<'a> {
    pub fn find(store: &'a ClientStore, id: Uuid) -> Self {
        store
            .find_blog(id)
            .map_or(SingleBlogView::Loading, SingleBlogView::Loaded)
    }

    pub fn render(&self, store: &ClientStore) -> String {
        let blog = match self {
            SingleBlogView::Loading => return "Loading...\n".to_string(),
            SingleBlogView::Loaded(blog) => blog,
        };
        let avatar = blog
            .author
            .image
            .as_deref()
            .map_or_else(|| DEFAULT_AVATAR.to_string(), |img| store.image_url(img));

        let mut out = String::new();
        let _ = writeln!(out, "{}", blog.title);
        let _ = writeln!(out, "{}", "=".repeat(blog.title.chars().count()));
        let _ = writeln!(out, "image:    {}", store.image_url(&blog.image));
        let _ = writeln!(out, "category: {}", blog.category);
        let _ = writeln!(out, "author:   {} ({avatar})", blog.author.name);
        let _ = writeln!(out, "date:     {}", format_date(blog.created_at));
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", blog.description);
        out
    }
}

/// Long month name, two-digit day and year, e.g. "March 05, 2024".
pub fn format_date(at: OffsetDateTime) -> String {
    at.format(format_description!("[month repr:long] [day], [year]"))
        .unwrap_or_else(|_| at.date().to_string())
}
