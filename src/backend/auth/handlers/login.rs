/**
 * Login Handlers
 *
 * `GET /login` returns the form context; `POST /login` verifies the
 * credentials, marks the session as logged in and redirects home.
 *
 * # Security
 *
 * - An unknown username and a wrong password produce the same 401 body
 * - Passwords are never logged
 */

use axum::{
    extract::{Form, State},
    response::{Json, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::backend::auth::handlers::types::LoginForm;
use crate::backend::error::BackendError;
use crate::backend::forum::ForumService;
use crate::backend::middleware::ClientSession;
use crate::shared::views::FormPage;

/// Login page context
pub async fn login_page(client: ClientSession) -> (CookieJar, Json<FormPage>) {
    let page = FormPage {
        viewer: client.viewer(),
        error: None,
    };
    (client.into_jar(), Json(page))
}

/// Log in
///
/// # Errors
///
/// * `400 Bad Request` - username or password empty
/// * `401 Unauthorized` - invalid credentials
pub async fn login(
    State(service): State<Arc<ForumService>>,
    mut client: ClientSession,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect), BackendError> {
    let token = service
        .login(&mut client.session, &form.username, &form.password)
        .await
        .inspect_err(|e| tracing::warn!("Login failed for {}: {}", form.username, e))?;

    Ok((client.store(service.sessions(), &token), Redirect::to("/")))
}
