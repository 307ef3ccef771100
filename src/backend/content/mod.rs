//! Content Module
//!
//! Posts and comments: the storage seam, its SQL, and the HTTP handlers for
//! the public and guarded content pages.
//!
//! # Module Structure
//!
//! ```text
//! content/
//! ├── mod.rs       - Module exports
//! ├── store.rs     - ContentStore trait and SQLite implementation
//! ├── posts.rs     - Post queries
//! ├── comments.rs  - Comment queries
//! └── handlers.rs  - HTTP handlers
//! ```
//!
//! # Ordering
//!
//! Post listings are newest first; comment threads are oldest first.

pub mod comments;
pub mod handlers;
pub mod posts;
pub mod store;

pub use handlers::{
    add_comment, create_post, create_post_page, home, search, view_post, view_profile,
};
pub use store::{ContentStore, SqliteContentStore};
