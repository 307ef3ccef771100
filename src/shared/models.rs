//! Forum Data Model
//!
//! Users, posts and comments as they come out of storage. Each post and
//! comment carries the author's username next to the author id so callers
//! never need a second lookup.
//!
//! Timestamps are stored by the store at creation time. Rendering them for
//! people goes through [`display_timestamp`] and [`display_date`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of characters kept by [`preview`]
pub const PREVIEW_CHARS: usize = 150;

/// Marker appended to truncated previews
pub const ELLIPSIS: &str = "...";

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

entity_id!(
    /// Opaque handle of a registered user
    UserId
);
entity_id!(
    /// Opaque handle of a post
    PostId
);
entity_id!(
    /// Opaque handle of a comment
    CommentId
);

/// Registered account
///
/// Created once by registration and never edited afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: UserId,
    /// Username (unique, non-empty)
    pub username: String,
    /// Email address (unique, non-empty)
    pub email: String,
    /// bcrypt digest; never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

/// Post with its denormalized author name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author_id: UserId,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Replace the content with its listing preview
    pub fn into_preview(mut self) -> Self {
        self.content = preview(&self.content);
        self
    }
}

/// Comment with its denormalized author name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub post_id: PostId,
    pub author_id: UserId,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

/// Shorten `content` to at most [`PREVIEW_CHARS`] characters
///
/// Content that already fits is returned unchanged. Longer content is cut on
/// a character boundary and gets [`ELLIPSIS`] appended.
pub fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{}", &content[..cut], ELLIPSIS),
        None => content.to_string(),
    }
}

/// Format a post or comment timestamp, e.g. `Jan 02, 2006 at 3:04 PM`
pub fn display_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%b %d, %Y at %-I:%M %p").to_string()
}

/// Format a calendar date, e.g. `Jan 02, 2006`
pub fn display_date(at: &DateTime<Utc>) -> String {
    at.format("%b %d, %Y").to_string()
}
