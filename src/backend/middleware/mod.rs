//! Middleware Module
//!
//! Request processing that runs before handlers.
//!
//! - **`session`** - `ClientSession` extractor resolving the session cookie

pub mod session;

pub use session::ClientSession;
