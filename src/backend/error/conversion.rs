/**
 * Error Conversion
 *
 * Turns a `BackendError` into an HTTP response.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 400
 * }
 * ```
 *
 * `NotAuthenticated` is the exception: it answers `303 See Other` to the
 * login page with no body.
 */

use axum::response::{IntoResponse, Json, Redirect, Response};

use crate::backend::error::types::{BackendError, LOGIN_PATH};

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        if self.redirects_to_login() {
            return Redirect::to(LOGIN_PATH).into_response();
        }

        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed with {}: {}", status, self);
        }

        let body = serde_json::json!({
            "error": self.message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
