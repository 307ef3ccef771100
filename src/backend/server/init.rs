/**
 * Server Initialization
 *
 * # Initialization Process
 *
 * 1. Open the database and bootstrap the schema
 * 2. Build the forum service (credential store, content store, sessions)
 * 3. Create the router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, load_service};
use crate::backend::server::state::AppState;
use crate::shared::config::ForumConfig;
use crate::shared::error::ForumError;

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails when the database cannot be opened or the credential store cannot
/// be initialized.
pub async fn create_app(config: &ForumConfig) -> Result<Router<()>, ForumError> {
    tracing::info!("Initializing forum backend");

    let db = load_database(config).await?;
    let service = load_service(config, db).await?;
    let app = create_router(AppState::new(service), &config.static_dir);

    tracing::info!("Router configured");
    Ok(app)
}
