/**
 * Router Configuration
 *
 * Assembles every forum route into one Axum router.
 *
 * # Routes
 *
 * - `GET /` - home feed
 * - `GET, POST /register` - registration
 * - `GET, POST /login` - login
 * - `GET /logout` - logout
 * - `GET, POST /create-post` - new post (login required)
 * - `GET /post/{id}` - post with comments
 * - `POST /post/{id}/comment` - comment (login required)
 * - `GET /user/{username}` - profile
 * - `GET /search?q=` - search
 * - `GET /static/{path}` - files from the configured static directory
 *
 * Anything else answers a 404 JSON body.
 */

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use std::path::Path;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::backend::auth::handlers::{login, login_page, logout, register, register_page};
use crate::backend::content::handlers::{
    add_comment, create_post, create_post_page, home, search, view_post, view_profile,
};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Shared state holding the forum service
/// * `static_dir` - Directory served under `/static`
pub fn create_router(app_state: AppState, static_dir: &Path) -> Router<()> {
    Router::new()
        .route("/", get(home))
        .route("/register", get(register_page).post(register))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
        .route("/create-post", get(create_post_page).post(create_post))
        .route("/post/{id}", get(view_post))
        .route("/post/{id}/comment", post(add_comment))
        .route("/user/{username}", get(view_profile))
        .route("/search", get(search))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn not_found() -> BackendError {
    BackendError::handler(StatusCode::NOT_FOUND, "Page not found")
}
