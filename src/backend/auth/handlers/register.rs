/**
 * Register Handlers
 *
 * `GET /register` returns the form context; `POST /register` creates the
 * account and sends the client to the login page.
 */

use axum::{
    extract::{Form, State},
    response::{Json, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::backend::auth::handlers::types::RegisterForm;
use crate::backend::error::BackendError;
use crate::backend::forum::ForumService;
use crate::backend::middleware::ClientSession;
use crate::shared::views::FormPage;

/// Registration page context
pub async fn register_page(client: ClientSession) -> (CookieJar, Json<FormPage>) {
    let page = FormPage {
        viewer: client.viewer(),
        error: None,
    };
    (client.into_jar(), Json(page))
}

/// Create an account
///
/// # Errors
///
/// * `400 Bad Request` - a field is empty
/// * `409 Conflict` - username or email already taken
/// * `503 Service Unavailable` - storage timed out
pub async fn register(
    State(service): State<Arc<ForumService>>,
    client: ClientSession,
    Form(form): Form<RegisterForm>,
) -> Result<(CookieJar, Redirect), BackendError> {
    tracing::info!("Registration request for: {}", form.username);

    service
        .register(&form.username, &form.email, &form.password)
        .await?;

    Ok((client.into_jar(), Redirect::to("/login")))
}
