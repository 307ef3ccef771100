//! In-process HTTP fixtures
//!
//! Each browser is an `axum_test::TestServer` over the same router that
//! saves cookies between requests, so the session cookie travels like it
//! would in a real browser.

use agora_forum::backend::auth::sessions::SESSION_COOKIE;
use agora_forum::backend::routes::create_router;
use agora_forum::backend::server::state::AppState;
use axum::http::{header::LOCATION, StatusCode};
use axum::Router;
use axum_extra::extract::cookie::Cookie;
use axum_test::{TestResponse, TestServer};
use std::sync::Arc;

use super::database::TestDatabase;

/// A freshly built app backed by its own database
pub struct TestApp {
    pub db: Arc<TestDatabase>,
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = TestDatabase::new().await;
        let service = db.service().await;
        let router = create_router(AppState::new(service), db.static_dir());
        Self {
            db: Arc::new(db),
            router,
        }
    }

    /// A new browser on this app, starting without cookies
    pub fn browser(&self) -> TestServer {
        TestServer::builder()
            .save_cookies()
            .build(self.router.clone())
            .expect("Failed to start test server")
    }
}

/// Register and log in, leaving `browser` authenticated
pub async fn sign_in(browser: &TestServer, username: &str, password: &str) {
    let email = format!("{}@example.com", username);
    let response = browser
        .post("/register")
        .form(&[("username", username), ("email", email.as_str()), ("password", password)])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER, "{}", response.text());

    let response = browser
        .post("/login")
        .form(&[("username", username), ("password", password)])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER, "{}", response.text());
}

/// Target of a redirect response
pub fn location(response: &TestResponse) -> String {
    response
        .header(LOCATION)
        .to_str()
        .expect("Location header is not ASCII")
        .to_string()
}

/// The session cookie set by `response`, if any
pub fn session_cookie(response: &TestResponse) -> Option<Cookie<'static>> {
    response.maybe_cookie(SESSION_COOKIE)
}
