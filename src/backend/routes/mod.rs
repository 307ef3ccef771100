//! Routes Module
//!
//! HTTP route configuration. Handlers live next to the code they serve
//! (`auth::handlers`, `content::handlers`); this module wires them together
//! with static file serving, the 404 fallback and request tracing.

/// Main router creation
pub mod router;

pub use router::create_router;
