/**
 * Authentication Form Types
 *
 * Bodies of the register and login forms. Missing fields decode as empty
 * strings so they fail validation with a readable message instead of a
 * form rejection.
 */

use serde::{Deserialize, Serialize};

/// Registration form
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    /// Plaintext, hashed before storage
    pub password: String,
}

/// Login form
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}
