/**
 * Session Extractor
 *
 * Resolves the client's session from the `forum_session` cookie before the
 * handler runs. A missing or invalid cookie yields a new anonymous session
 * whose cookie is already queued in the outgoing jar.
 *
 * Handlers return the jar as a response part, so any cookie change is
 * written into the headers ahead of the body.
 */

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;

use crate::backend::auth::sessions::{Session, SessionManager, SessionToken, SESSION_COOKIE};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::views::Viewer;

/// The current client's session plus the cookies to send back
#[derive(Debug)]
pub struct ClientSession {
    pub session: Session,
    jar: CookieJar,
}

impl ClientSession {
    pub fn viewer(&self) -> Viewer {
        self.session.viewer()
    }

    /// Queue a re-signed session cookie and hand over the jar
    pub fn store(self, sessions: &SessionManager, token: &SessionToken) -> CookieJar {
        self.jar.add(sessions.cookie(token))
    }

    /// Cookies to send back when the session did not change
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl FromRequestParts<AppState> for ClientSession {
    type Rejection = BackendError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(SESSION_COOKIE).map(|cookie| cookie.value().to_owned());

        let sessions = state.sessions();
        let lookup = sessions.get_or_create(token.as_deref())?;

        let jar = match lookup.issued {
            Some(issued) => jar.add(sessions.cookie(&issued)),
            None => jar,
        };

        Ok(Self {
            session: lookup.session,
            jar,
        })
    }
}
