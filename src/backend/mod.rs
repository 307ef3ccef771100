//! Backend Module
//!
//! All server-side code for the forum: storage, sessions, the forum service
//! and the Axum HTTP surface.
//!
//! # Architecture
//!
//! - **`db`** - SQLite pool, schema bootstrap, bounded operation timeout
//! - **`auth`** - Credential store, session manager, account handlers
//! - **`content`** - Content store and content handlers
//! - **`forum`** - `ForumService` orchestrating the stores and sessions
//! - **`middleware`** - `ClientSession` cookie extractor
//! - **`error`** - HTTP mapping of the error taxonomy
//! - **`routes`** - Router assembly
//! - **`server`** - State, service wiring, `create_app`
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs
//! ├── main.rs        - forum-server binary
//! ├── db/            - Storage engine
//! ├── auth/          - Accounts and sessions
//! ├── content/       - Posts and comments
//! ├── forum/         - Forum service
//! ├── middleware/    - Request extractors
//! ├── error/         - Error responses
//! ├── routes/        - Route configuration
//! └── server/        - Initialization and state
//! ```
//!
//! # Concurrency
//!
//! Every request runs as its own task. There is no in-process mutable
//! cache: stores read and write SQLite directly, and uniqueness is enforced
//! by the schema's constraints. Sessions live entirely in the signed cookie,
//! so concurrent requests from one client resolve as last write wins.

/// SQLite storage engine
pub mod db;

/// Authentication and user management
pub mod auth;

/// Posts and comments
pub mod content;

/// Forum service
pub mod forum;

/// Middleware for request processing
pub mod middleware;

/// Backend error types
pub mod error;

/// Route configuration
pub mod routes;

/// Server setup and configuration
pub mod server;

pub use error::BackendError;
pub use forum::ForumService;
pub use server::create_app;
