//! Feed ordering and filtering.
//!
//! Every post listing is emergency-first, then newest-first. Posts with the
//! same tier and timestamp keep their collection (creation) order.

use std::cmp::Ordering;

use schoolfeed_types::{Category, Post};

/// Compare two posts for feed display.
pub fn feed_order(a: &Post, b: &Post) -> Ordering {
    b.category
        .is_emergency()
        .cmp(&a.category.is_emergency())
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Sort `posts` into feed order. The sort is stable.
pub fn sort_for_feed(posts: &mut [Post]) {
    posts.sort_by(feed_order);
}

/// Keep only posts in `category`, preserving order. `None` keeps everything.
pub fn filter_category(posts: Vec<Post>, category: Option<Category>) -> Vec<Post> {
    match category {
        Some(category) => posts.into_iter().filter(|p| p.category == category).collect(),
        None => posts,
    }
}
