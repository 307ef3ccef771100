//! Backend Error Module
//!
//! Maps the forum's error taxonomy onto HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports
//! ├── types.rs      - BackendError and its status mapping
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! Handlers return `Result<_, BackendError>`; `?` on a `ForumError` converts
//! automatically. Storage detail is logged, never sent to the client.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::{BackendError, LOGIN_PATH};
