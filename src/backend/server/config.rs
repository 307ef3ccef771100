/**
 * Server Configuration
 *
 * Turns a `ForumConfig` into the running services: the SQLite database and
 * the forum service wired on top of it.
 *
 * Unlike optional integrations, the database is required; a failure here
 * aborts startup.
 */

use std::sync::Arc;

use crate::backend::auth::sessions::SessionManager;
use crate::backend::auth::users::SqliteCredentialStore;
use crate::backend::content::store::SqliteContentStore;
use crate::backend::db::{Database, StoreError};
use crate::backend::forum::ForumService;
use crate::shared::config::ForumConfig;
use crate::shared::error::ForumError;

/// Open the database and bootstrap its schema
///
/// # Errors
///
/// Fails if the file cannot be opened or created, or the schema cannot be
/// applied within the storage timeout.
pub async fn load_database(config: &ForumConfig) -> Result<Database, StoreError> {
    tracing::info!("Opening database at {}", config.database_path.display());
    Database::open(&config.database_path, config.storage_timeout)
        .await
        .inspect_err(|e| tracing::error!("Failed to open database: {}", e))
}

/// Build the forum service on top of an open database
pub async fn load_service(config: &ForumConfig, db: Database) -> Result<ForumService, ForumError> {
    let credentials = SqliteCredentialStore::new(db.clone(), config.bcrypt_cost).await?;
    let content = SqliteContentStore::new(db);
    let sessions = SessionManager::new(&config.session_secret, config.session_max_age);

    Ok(ForumService::new(
        Arc::new(credentials),
        Arc::new(content),
        sessions,
        config,
    ))
}
