//! Per-Operation View Types
//!
//! Each read operation of the forum produces one of these structs. They hold
//! exactly what a page renderer needs: display strings for timestamps, the
//! denormalized author name, and the viewer context.

use serde::{Deserialize, Serialize};

use crate::shared::models::{
    display_date, display_timestamp, Comment, CommentId, Post, PostId, User, UserId,
};

/// Who is looking at the page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub is_authenticated: bool,
    pub username: Option<String>,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(username: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            username: Some(username.into()),
        }
    }
}

/// Post as shown in listings and on its own page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostView {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author_id: UserId,
    pub author_name: String,
    pub created_at: String,
}

impl From<Post> for PostView {
    fn from(post: Post) -> Self {
        Self {
            created_at: display_timestamp(&post.created_at),
            id: post.id,
            title: post.title,
            content: post.content,
            author_id: post.author_id,
            author_name: post.author_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
    pub id: CommentId,
    pub content: String,
    pub author_id: UserId,
    pub author_name: String,
    pub created_at: String,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        Self {
            created_at: display_timestamp(&comment.created_at),
            id: comment.id,
            content: comment.content,
            author_id: comment.author_id,
            author_name: comment.author_name,
        }
    }
}

/// Home feed: most recent posts first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeView {
    pub viewer: Viewer,
    pub posts: Vec<PostView>,
}

/// A post with its comment thread in reading order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailView {
    pub viewer: Viewer,
    pub post: PostView,
    pub comments: Vec<CommentView>,
}

/// Public part of an account
///
/// `email` is only filled in when the viewer owns the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUser {
    pub id: UserId,
    pub username: String,
    pub email: Option<String>,
    pub joined: String,
}

impl ProfileUser {
    pub fn from_user(user: User, is_owner: bool) -> Self {
        Self {
            joined: display_date(&user.created_at),
            id: user.id,
            username: user.username,
            email: is_owner.then_some(user.email),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileView {
    pub viewer: Viewer,
    pub user: ProfileUser,
    pub posts: Vec<PostView>,
    pub post_count: usize,
    /// True when the viewer is looking at their own profile
    pub is_owner: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchView {
    pub viewer: Viewer,
    pub query: String,
    pub posts: Vec<PostView>,
    pub result_count: usize,
}

/// Data for a form page (register, login, create post)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormPage {
    pub viewer: Viewer,
    pub error: Option<String>,
}
