use std::fmt::Write as _;

use super::single_blog::format_date;
use crate::client::store::ClientStore;

/// Public list of every blog in the store, newest first as served.
pub fn render_blog_list(store: &ClientStore) -> String {
    if store.blogs().is_empty() {
        return "No blogs yet.\n".to_string();
    }
    let mut out = String::new();
    for blog in store.blogs() {
        let _ = writeln!(
            out,
            "{}  {}  [{}] by {} on {}",
            blog.id,
            blog.title,
            blog.category,
            blog.author.name,
            format_date(blog.created_at)
        );
    }
    out
}
