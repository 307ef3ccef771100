/**
 * Credential Store
 *
 * This module persists user accounts and their bcrypt password digests.
 *
 * # Guarantees
 *
 * - Username and email are unique; the UNIQUE constraints in the schema
 *   decide, so two concurrent registrations cannot both win.
 * - Plaintext passwords are never stored. Verification recomputes the
 *   digest through `bcrypt::verify`, which compares in constant time.
 * - An unknown username costs the same bcrypt work as a wrong password and
 *   yields the same error.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::backend::db::Database;
use crate::shared::error::{require, ForumError};
use crate::shared::models::{User, UserId};

/// Password used to build the digest checked for unknown usernames
const DUMMY_PASSWORD: &str = "agora-timing-equalizer";

/// Account persistence and credential verification
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Create an account and return its id
    ///
    /// # Errors
    /// * `Validation` - a field is empty
    /// * `Conflict` - username or email already exists
    async fn register(&self, username: &str, email: &str, password: &str)
        -> Result<UserId, ForumError>;

    /// Check a username/password pair
    ///
    /// # Errors
    /// * `Authentication` - unknown username or wrong password
    async fn verify(&self, username: &str, password: &str) -> Result<UserId, ForumError>;

    /// Look up an account by username
    ///
    /// # Errors
    /// * `NotFound` - no such user
    async fn find_user(&self, username: &str) -> Result<User, ForumError>;
}

/// Insert a new user row
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `username` - Chosen username
/// * `email` - User email
/// * `password_hash` - bcrypt digest
/// * `created_at` - Registration time
///
/// # Returns
/// Id of the created user
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
    created_at: DateTime<Utc>,
) -> Result<UserId, sqlx::Error> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO users (username, email, password_hash, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(created_at)
    .fetch_one(pool)
    .await?;

    Ok(UserId(id))
}

/// Get user by username
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, created_at
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// bcrypt-backed credential store on SQLite
#[derive(Clone)]
pub struct SqliteCredentialStore {
    db: Database,
    bcrypt_cost: u32,
    dummy_hash: Arc<str>,
}

impl SqliteCredentialStore {
    /// Create the store
    ///
    /// Computes the digest used to equalize timing for unknown usernames,
    /// so this costs one bcrypt round at `bcrypt_cost`.
    pub async fn new(db: Database, bcrypt_cost: u32) -> Result<Self, ForumError> {
        let dummy_hash = hash_password(DUMMY_PASSWORD.to_string(), bcrypt_cost).await?;
        Ok(Self {
            db,
            bcrypt_cost,
            dummy_hash: dummy_hash.into(),
        })
    }
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserId, ForumError> {
        require("username", username, "Username is required")?;
        require("email", email, "Email is required")?;
        require("password", password, "Password is required")?;

        let password_hash = hash_password(password.to_string(), self.bcrypt_cost).await?;

        let id = self
            .db
            .run(
                "create_user",
                create_user(self.db.pool(), username, email, &password_hash, Utc::now()),
            )
            .await?;

        tracing::info!("User registered: {} ({})", username, id);
        Ok(id)
    }

    async fn verify(&self, username: &str, password: &str) -> Result<UserId, ForumError> {
        let user = self
            .db
            .run("get_user_by_username", get_user_by_username(self.db.pool(), username))
            .await?;

        let (user_id, digest) = match &user {
            Some(user) => (Some(user.id), user.password_hash.clone()),
            None => (None, self.dummy_hash.to_string()),
        };

        let matches = verify_password(password.to_string(), digest).await?;

        match user_id {
            Some(id) if matches => Ok(id),
            _ => {
                tracing::warn!("Rejected credentials for username: {}", username);
                Err(ForumError::Authentication)
            }
        }
    }

    async fn find_user(&self, username: &str) -> Result<User, ForumError> {
        self.db
            .run("get_user_by_username", get_user_by_username(self.db.pool(), username))
            .await?
            .ok_or_else(|| ForumError::not_found("User"))
    }
}

async fn hash_password(password: String, cost: u32) -> Result<String, ForumError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| ForumError::internal(format!("hashing task failed: {}", e)))?
        .map_err(|e| ForumError::internal(format!("failed to hash password: {}", e)))
}

async fn verify_password(password: String, digest: String) -> Result<bool, ForumError> {
    let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &digest))
        .await
        .map_err(|e| ForumError::internal(format!("verification task failed: {}", e)))?;

    match outcome {
        Ok(matches) => Ok(matches),
        Err(e) => {
            // A malformed stored digest still reads as bad credentials outside
            tracing::error!("Password verification error: {:?}", e);
            Ok(false)
        }
    }
}
