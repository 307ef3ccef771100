//! Forum Service
//!
//! Orchestrates the credential store, the content store and the session
//! manager into the forum's operations. The stores are injected as trait
//! objects at construction.
//!
//! # Session State Machine
//!
//! `Anonymous -> Authenticated` on a successful login and back on logout.
//! Creating posts and comments requires `Authenticated`; an anonymous
//! session gets `ForumError::NotAuthenticated` and nothing is written.
//!
//! Operations that change the session return the freshly signed
//! `SessionToken`, which the caller must hand back to the client before the
//! response body is written.

use std::sync::Arc;

use crate::backend::auth::sessions::{Session, SessionManager, SessionToken};
use crate::backend::auth::users::CredentialStore;
use crate::backend::content::store::ContentStore;
use crate::shared::config::ForumConfig;
use crate::shared::error::{require, ForumError};
use crate::shared::models::{CommentId, PostId, UserId};
use crate::shared::views::{
    CommentView, HomeView, PostDetailView, PostView, ProfileUser, ProfileView, SearchView,
};

/// The forum's operation surface
#[derive(Clone)]
pub struct ForumService {
    credentials: Arc<dyn CredentialStore>,
    content: Arc<dyn ContentStore>,
    sessions: SessionManager,
    home_feed_limit: u32,
    search_limit: u32,
}

impl ForumService {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        content: Arc<dyn ContentStore>,
        sessions: SessionManager,
        config: &ForumConfig,
    ) -> Self {
        Self {
            credentials,
            content,
            sessions,
            home_feed_limit: config.home_feed_limit,
            search_limit: config.search_limit,
        }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Create an account
    ///
    /// A conflict never says whether the username or the email collided.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserId, ForumError> {
        self.credentials.register(username, email, password).await
    }

    /// Check credentials and mark the session as logged in
    ///
    /// # Returns
    /// The signed token for the updated session
    ///
    /// # Errors
    /// * `Validation` - empty username or password
    /// * `Authentication` - unknown user or wrong password
    pub async fn login(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> Result<SessionToken, ForumError> {
        require("username", username, "Username and password are required")?;
        require("password", password, "Username and password are required")?;

        let user_id = self.credentials.verify(username, password).await?;
        let token = self.sessions.set_authenticated(session, user_id, username)?;

        tracing::info!("User logged in: {} ({})", username, user_id);
        Ok(token)
    }

    /// Drop the session's identity
    ///
    /// Logging out an anonymous session is a no-op that still re-signs it.
    pub fn logout(&self, session: &mut Session) -> Result<SessionToken, ForumError> {
        if let Some(username) = session.username() {
            tracing::info!("User logged out: {}", username);
        }
        self.sessions.clear(session)
    }

    /// Publish a post as the session's user
    pub async fn create_post(
        &self,
        session: &Session,
        title: &str,
        content: &str,
    ) -> Result<PostId, ForumError> {
        let author_id = require_login(session, "create post")?;
        self.content.create_post(title, content, author_id).await
    }

    /// Comment on a post as the session's user
    pub async fn add_comment(
        &self,
        session: &Session,
        post_id: PostId,
        content: &str,
    ) -> Result<CommentId, ForumError> {
        let author_id = require_login(session, "add comment")?;
        self.content.add_comment(post_id, content, author_id).await
    }

    /// A post with its comment thread
    pub async fn view_post(
        &self,
        session: &Session,
        id: PostId,
    ) -> Result<PostDetailView, ForumError> {
        let post = self.content.get_post(id).await?;
        let comments = self.content.list_comments(id).await?;

        Ok(PostDetailView {
            viewer: session.viewer(),
            post: post.into(),
            comments: comments.into_iter().map(CommentView::from).collect(),
        })
    }

    /// A user's profile and post previews
    pub async fn view_profile(
        &self,
        session: &Session,
        username: &str,
    ) -> Result<ProfileView, ForumError> {
        let user = self.credentials.find_user(username).await?;
        let posts = self.content.list_posts_by_author(user.id).await?;
        let is_owner = session.username() == Some(user.username.as_str());

        Ok(ProfileView {
            viewer: session.viewer(),
            user: ProfileUser::from_user(user, is_owner),
            post_count: posts.len(),
            posts: posts.into_iter().map(PostView::from).collect(),
            is_owner,
        })
    }

    /// Most recent posts
    pub async fn home(&self, session: &Session) -> Result<HomeView, ForumError> {
        let posts = self.content.list_recent_posts(self.home_feed_limit).await?;
        Ok(HomeView {
            viewer: session.viewer(),
            posts: posts.into_iter().map(PostView::from).collect(),
        })
    }

    /// Search titles and contents
    pub async fn search(&self, session: &Session, query: &str) -> Result<SearchView, ForumError> {
        let query = query.trim();
        let posts = self.content.search_posts(query, self.search_limit).await?;
        Ok(SearchView {
            viewer: session.viewer(),
            query: query.to_string(),
            result_count: posts.len(),
            posts: posts.into_iter().map(PostView::from).collect(),
        })
    }
}

fn require_login(session: &Session, operation: &str) -> Result<UserId, ForumError> {
    session.user_id().ok_or_else(|| {
        tracing::warn!("Anonymous session {} tried to {}", session.id(), operation);
        ForumError::NotAuthenticated
    })
}
