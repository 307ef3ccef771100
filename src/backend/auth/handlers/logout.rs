/**
 * Logout Handler
 *
 * `GET /logout` clears the session identity and redirects home. Calling it
 * while anonymous is harmless.
 */

use axum::{extract::State, response::Redirect};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::backend::error::BackendError;
use crate::backend::forum::ForumService;
use crate::backend::middleware::ClientSession;

pub async fn logout(
    State(service): State<Arc<ForumService>>,
    mut client: ClientSession,
) -> Result<(CookieJar, Redirect), BackendError> {
    let token = service.logout(&mut client.session)?;
    Ok((client.store(service.sessions(), &token), Redirect::to("/")))
}
