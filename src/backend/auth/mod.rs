//! Authentication Module
//!
//! Accounts, sessions and the HTTP handlers for registering, logging in and
//! logging out.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs       - Module exports
//! ├── users.rs     - Credential store (bcrypt digests on SQLite)
//! ├── sessions.rs  - Signed session tokens and cookies
//! └── handlers/    - HTTP handlers
//! ```
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt before storage
//! - Session tokens are HS256 JWTs; a token signed with another secret is
//!   treated as absent
//! - Invalid credentials return 401 with one generic message

/// Credential store
pub mod users;

/// Session management
pub mod sessions;

/// HTTP handlers for the account pages
pub mod handlers;

pub use handlers::{login, login_page, logout, register, register_page};
pub use sessions::{Session, SessionManager, SessionToken, SESSION_COOKIE};
pub use users::{CredentialStore, SqliteCredentialStore};
