/**
 * Content Handlers
 *
 * HTTP handlers for the public content pages and the two guarded writes.
 *
 * | Route | Handler | Login |
 * |---|---|---|
 * | `GET /` | `home` | no |
 * | `GET /create-post` | `create_post_page` | yes |
 * | `POST /create-post` | `create_post` | yes |
 * | `GET /post/{id}` | `view_post` | no |
 * | `POST /post/{id}/comment` | `add_comment` | yes |
 * | `GET /user/{username}` | `view_profile` | no |
 * | `GET /search?q=` | `search` | no |
 *
 * Read views answer JSON. Writes answer `303 See Other`; anonymous writes
 * are sent to `/login` without touching storage.
 */

use axum::{
    extract::{Form, Path, Query, State},
    response::{Json, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::backend::error::BackendError;
use crate::backend::forum::ForumService;
use crate::backend::middleware::ClientSession;
use crate::shared::error::ForumError;
use crate::shared::models::PostId;
use crate::shared::views::{FormPage, HomeView, PostDetailView, ProfileView, SearchView};

/// New post form
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct PostForm {
    pub title: String,
    pub content: String,
}

/// Comment form
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct CommentForm {
    pub content: String,
}

/// Search query string
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct SearchParams {
    pub q: String,
}

/// Post ids in paths are decimal; anything else is an unknown post
fn parse_post_id(raw: &str) -> Result<PostId, ForumError> {
    raw.parse::<i64>()
        .map(PostId)
        .map_err(|_| ForumError::not_found("Post"))
}

/// Recent posts
pub async fn home(
    State(service): State<Arc<ForumService>>,
    client: ClientSession,
) -> Result<(CookieJar, Json<HomeView>), BackendError> {
    let view = service.home(&client.session).await?;
    Ok((client.into_jar(), Json(view)))
}

/// New post page context
pub async fn create_post_page(
    client: ClientSession,
) -> Result<(CookieJar, Json<FormPage>), BackendError> {
    if !client.session.is_authenticated() {
        return Err(ForumError::NotAuthenticated.into());
    }
    let page = FormPage {
        viewer: client.viewer(),
        error: None,
    };
    Ok((client.into_jar(), Json(page)))
}

/// Publish a post
pub async fn create_post(
    State(service): State<Arc<ForumService>>,
    client: ClientSession,
    Form(form): Form<PostForm>,
) -> Result<(CookieJar, Redirect), BackendError> {
    service
        .create_post(&client.session, &form.title, &form.content)
        .await?;
    Ok((client.into_jar(), Redirect::to("/")))
}

/// A post with its comments
pub async fn view_post(
    State(service): State<Arc<ForumService>>,
    client: ClientSession,
    Path(id): Path<String>,
) -> Result<(CookieJar, Json<PostDetailView>), BackendError> {
    let id = parse_post_id(&id)?;
    let view = service.view_post(&client.session, id).await?;
    Ok((client.into_jar(), Json(view)))
}

/// Comment on a post
pub async fn add_comment(
    State(service): State<Arc<ForumService>>,
    client: ClientSession,
    Path(id): Path<String>,
    Form(form): Form<CommentForm>,
) -> Result<(CookieJar, Redirect), BackendError> {
    let id = parse_post_id(&id)?;
    service
        .add_comment(&client.session, id, &form.content)
        .await?;
    Ok((client.into_jar(), Redirect::to(&format!("/post/{}", id))))
}

/// A user's profile
pub async fn view_profile(
    State(service): State<Arc<ForumService>>,
    client: ClientSession,
    Path(username): Path<String>,
) -> Result<(CookieJar, Json<ProfileView>), BackendError> {
    let view = service.view_profile(&client.session, &username).await?;
    Ok((client.into_jar(), Json(view)))
}

/// Search posts
pub async fn search(
    State(service): State<Arc<ForumService>>,
    client: ClientSession,
    Query(params): Query<SearchParams>,
) -> Result<(CookieJar, Json<SearchView>), BackendError> {
    let view = service.search(&client.session, &params.q).await?;
    Ok((client.into_jar(), Json(view)))
}
