//! Server Module
//!
//! Application state, service wiring and router construction.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports
//! ├── state.rs  - AppState and FromRef impls
//! ├── config.rs - Database and service loading
//! └── init.rs   - create_app
//! ```

/// Application state management
pub mod state;

/// Database and service loading
pub mod config;

/// Server initialization
pub mod init;

pub use init::create_app;
pub use state::AppState;
