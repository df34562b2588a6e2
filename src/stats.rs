//! Normalization of post engagement counters.
//!
//! Post payloads from dummyjson-style APIs disagree on where counters live:
//! `reactions` may be a plain number or an object with `likes`, `total` or
//! `upvotes`; views and comments show up under several spellings. This module
//! reduces a raw payload to one canonical `u64` per counter so that nothing
//! downstream has to branch on the shape.
//!
//! # Examples
//!
//! ```rust
//! use bubbletea_paged_list::stats::PostStats;
//! use serde_json::json;
//!
//! let post = json!({
//!     "id": 7,
//!     "views": 305,
//!     "reactions": { "likes": 192, "dislikes": 25 }
//! });
//! let stats = PostStats::from_value(&post);
//! assert_eq!(stats.id, 7);
//! assert_eq!(stats.views, 305);
//! assert_eq!(stats.likes, 192);
//! assert_eq!(stats.comments, 0);
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::sort::{SortKey, SortValue};

/// The first numeric key wins; negative counts clamp to 0.
fn number(value: Option<&Value>) -> Option<u64> {
    let value = value?;
    value
        .as_u64()
        .or_else(|| value.as_f64().map(|n| n.max(0.0) as u64))
}

fn first_number(post: &Value, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|key| number(post.get(*key)))
}

/// View count: `views`, `viewsCount` or `viewCount`; 0 when absent.
pub fn views(post: &Value) -> u64 {
    first_number(post, &["views", "viewsCount", "viewCount"]).unwrap_or(0)
}

/// Like count.
///
/// Checked in order: `likes`, numeric `reactions`, `reactions.likes`,
/// `reactions.total`, `reactions.upvotes`, then `likesCount` and `thumbsUp`.
pub fn likes(post: &Value) -> u64 {
    if let Some(likes) = number(post.get("likes")) {
        return likes;
    }
    match post.get("reactions") {
        Some(reactions) if reactions.is_number() => number(Some(reactions)).unwrap_or(0),
        Some(reactions) if reactions.is_object() => {
            first_number(reactions, &["likes", "total", "upvotes"]).unwrap_or(0)
        }
        _ => first_number(post, &["likesCount", "thumbsUp"]).unwrap_or(0),
    }
}

/// Comment count: `comments`, `reactions.comments`, `commentsCount`,
/// `commentCount` or `totalComments`; 0 when absent.
pub fn comments(post: &Value) -> u64 {
    number(post.get("comments"))
        .or_else(|| post.get("reactions").and_then(|r| number(r.get("comments"))))
        .or_else(|| first_number(post, &["commentsCount", "commentCount", "totalComments"]))
        .unwrap_or(0)
}

/// Canonical counters for one post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PostStats {
    /// Post id; 0 when the payload has none.
    pub id: u64,
    /// Normalized view count.
    pub views: u64,
    /// Normalized like count.
    pub likes: u64,
    /// Normalized comment count.
    pub comments: u64,
}

impl PostStats {
    /// Extracts all counters from a raw post payload.
    pub fn from_value(post: &Value) -> Self {
        Self {
            id: number(post.get("id")).unwrap_or(0),
            views: views(post),
            likes: likes(post),
            comments: comments(post),
        }
    }
}

impl SortKey for PostStats {
    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            "id" => self.id.into(),
            "views" => self.views.into(),
            "likes" => self.likes.into(),
            "comments" => self.comments.into(),
            _ => SortValue::Missing,
        }
    }
}
