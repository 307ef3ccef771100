/**
 * Application State Management
 *
 * `AppState` is the router state shared by every handler. It implements
 * `FromRef` so handlers can extract just the part they use.
 *
 * # Example
 *
 * ```rust,ignore
 * use axum::extract::State;
 * use std::sync::Arc;
 *
 * async fn handler(State(service): State<Arc<ForumService>>) {
 *     // ...
 * }
 * ```
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::auth::sessions::SessionManager;
use crate::backend::forum::ForumService;

/// Shared state of the HTTP server
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ForumService>,
}

impl AppState {
    pub fn new(service: ForumService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn sessions(&self) -> &SessionManager {
        self.service.sessions()
    }
}

impl FromRef<AppState> for Arc<ForumService> {
    fn from_ref(state: &AppState) -> Self {
        state.service.clone()
    }
}
