//! Authentication Handlers Module
//!
//! HTTP handlers for the account pages.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports
//! ├── types.rs     - Form bodies
//! ├── register.rs  - GET/POST /register
//! ├── login.rs     - GET/POST /login
//! └── logout.rs    - GET /logout
//! ```
//!
//! # Flow
//!
//! 1. **Register**: form posted → account created → 303 to `/login`
//! 2. **Login**: form posted → credentials verified → session cookie
//!    re-signed → 303 to `/`
//! 3. **Logout**: identity cleared → session cookie re-signed → 303 to `/`

/// Form bodies
pub mod types;

/// Register handlers
pub mod register;

/// Login handlers
pub mod login;

/// Logout handler
pub mod logout;

pub use login::{login, login_page};
pub use logout::logout;
pub use register::{register, register_page};
pub use types::{LoginForm, RegisterForm};
