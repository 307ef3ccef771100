//! Shared Module
//!
//! This module contains the domain types of the forum that do not depend on
//! the HTTP layer: the data model, the typed view structs handed to page
//! renderers, the error taxonomy and the configuration.
//!
//! # Overview
//!
//! Everything here is plain data. The storage engine and the request
//! handlers live in [`crate::backend`] and exchange these types.

/// Users, posts, comments and their ids
pub mod models;

/// Per-operation result structs for page rendering
pub mod views;

/// Forum error taxonomy
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use config::{ConfigError, ForumConfig, ForumConfigBuilder};
pub use error::ForumError;
pub use models::{Comment, CommentId, Post, PostId, User, UserId};
pub use views::{
    CommentView, FormPage, HomeView, PostDetailView, PostView, ProfileUser, ProfileView,
    SearchView, Viewer,
};
