/**
 * Session Management
 *
 * This module issues and validates the opaque token a client holds to be
 * recognized across requests.
 *
 * # Token Format
 *
 * The token is an HS256 JWT signed with the configured session secret. Its
 * claims carry the session id and, once logged in, the user id and
 * username. A token that fails signature or shape checks is ignored and the
 * client gets a fresh anonymous session, so a session can never be forged
 * without the secret.
 *
 * Tokens carry no `exp` claim. Their `iat` is checked against the same
 * max age the cookie advertises, so a token copied out of the cookie stops
 * working once the cookie would have expired. Logging out re-signs the
 * session, which restarts that clock for the anonymous token only.
 */

use axum_extra::extract::cookie::{Cookie, SameSite};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::shared::error::ForumError;
use crate::shared::models::UserId;
use crate::shared::views::Viewer;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "forum_session";

/// Tolerated clock drift for `iat` values from the future
const CLOCK_SKEW_SECS: i64 = 60;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Session ID
    pub sid: Uuid,
    /// User ID, present when authenticated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<i64>,
    /// Username, present when authenticated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usr: Option<String>,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Authentication state of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAuth {
    Anonymous,
    Authenticated { user_id: UserId, username: String },
}

/// Per-client session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: Uuid,
    auth: SessionAuth,
}

impl Session {
    /// Fresh anonymous session
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            auth: SessionAuth::Anonymous,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth, SessionAuth::Authenticated { .. })
    }

    pub fn user_id(&self) -> Option<UserId> {
        match &self.auth {
            SessionAuth::Authenticated { user_id, .. } => Some(*user_id),
            SessionAuth::Anonymous => None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match &self.auth {
            SessionAuth::Authenticated { username, .. } => Some(username),
            SessionAuth::Anonymous => None,
        }
    }

    /// Viewer context for page views
    pub fn viewer(&self) -> Viewer {
        match &self.auth {
            SessionAuth::Authenticated { username, .. } => Viewer::authenticated(username.clone()),
            SessionAuth::Anonymous => Viewer::anonymous(),
        }
    }

    fn to_claims(&self) -> Claims {
        let (uid, usr) = match &self.auth {
            SessionAuth::Authenticated { user_id, username } => {
                (Some(user_id.0), Some(username.clone()))
            }
            SessionAuth::Anonymous => (None, None),
        };
        Claims {
            sid: self.id,
            uid,
            usr,
            iat: chrono::Utc::now().timestamp(),
        }
    }

    fn from_claims(claims: Claims) -> Option<Self> {
        let auth = match (claims.uid, claims.usr) {
            (Some(uid), Some(usr)) if !usr.is_empty() => SessionAuth::Authenticated {
                user_id: UserId(uid),
                username: usr,
            },
            (None, None) => SessionAuth::Anonymous,
            _ => return None,
        };
        Some(Self {
            id: claims.sid,
            auth,
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Signed session token handed to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Result of resolving a client's token
#[derive(Debug, Clone)]
pub struct SessionLookup {
    pub session: Session,
    /// Set when a new session was created and its token must be sent back
    pub issued: Option<SessionToken>,
}

/// Signs, validates and mutates sessions
#[derive(Clone)]
pub struct SessionManager {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    max_age: Duration,
}

impl SessionManager {
    /// Create a manager signing with `secret`
    pub fn new(secret: &str, max_age: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            max_age,
        }
    }

    /// Resolve the session for a client token
    ///
    /// A missing or invalid token yields a fresh anonymous session together
    /// with the token to hand back to the client.
    pub fn get_or_create(&self, token: Option<&str>) -> Result<SessionLookup, ForumError> {
        if let Some(session) = token.and_then(|token| self.decode(token)) {
            return Ok(SessionLookup {
                session,
                issued: None,
            });
        }

        let session = Session::new();
        let issued = self.issue(&session)?;
        tracing::debug!("Created session {}", session.id());
        Ok(SessionLookup {
            session,
            issued: Some(issued),
        })
    }

    /// Mark the session as logged in and sign the new state
    pub fn set_authenticated(
        &self,
        session: &mut Session,
        user_id: UserId,
        username: &str,
    ) -> Result<SessionToken, ForumError> {
        session.auth = SessionAuth::Authenticated {
            user_id,
            username: username.to_string(),
        };
        self.issue(session)
    }

    /// Drop the identity from the session and sign the new state
    pub fn clear(&self, session: &mut Session) -> Result<SessionToken, ForumError> {
        session.auth = SessionAuth::Anonymous;
        self.issue(session)
    }

    /// Sign the current session state
    pub fn issue(&self, session: &Session) -> Result<SessionToken, ForumError> {
        encode(&Header::new(Algorithm::HS256), &session.to_claims(), &self.encoding)
            .map(SessionToken)
            .map_err(|e| ForumError::internal(format!("failed to sign session: {}", e)))
    }

    /// Verify a token and recover the session it carries
    ///
    /// Tokens issued more than the max age ago are rejected.
    pub fn decode(&self, token: &str) -> Option<Session> {
        let claims = match decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => {
                tracing::debug!("Ignoring invalid session token: {:?}", e);
                return None;
            }
        };

        if !self.is_fresh(claims.iat, chrono::Utc::now().timestamp()) {
            tracing::debug!("Ignoring expired session token for {}", claims.sid);
            return None;
        }
        Session::from_claims(claims)
    }

    fn is_fresh(&self, iat: i64, now: i64) -> bool {
        let max_age = i64::try_from(self.max_age.as_secs()).unwrap_or(i64::MAX);
        iat <= now.saturating_add(CLOCK_SKEW_SECS) && now.saturating_sub(iat) <= max_age
    }

    /// Cookie carrying `token`
    pub fn cookie(&self, token: &SessionToken) -> Cookie<'static> {
        let max_age = i64::try_from(self.max_age.as_secs()).unwrap_or(i64::MAX);
        Cookie::build((SESSION_COOKIE, token.0.clone()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(max_age))
            .build()
    }
}
