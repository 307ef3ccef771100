//! Agora Forum - Main Library
//!
//! Agora is a small community discussion forum: visitors register, log in,
//! write posts and comment on them. A home feed lists the most recent posts
//! and a search endpoint filters them by keyword.
//!
//! # Module Structure
//!
//! - **`shared`** - Domain types independent of the HTTP layer
//!   - Users, posts, comments and typed ids
//!   - View structs consumed by page renderers
//!   - Error taxonomy and configuration
//!
//! - **`backend`** - Server-side code
//!   - SQLite storage engine (credential and content stores)
//!   - Signed cookie sessions
//!   - Forum service orchestrating the stores
//!   - Axum router and handlers
//!
//! # Usage
//!
//! ```rust,no_run
//! use agora_forum::backend::server::init::create_app;
//! use agora_forum::shared::ForumConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ForumConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Domain types shared by the stores, the service and the handlers
pub mod shared;

/// Server-side code: storage, sessions, service, HTTP
pub mod backend;
