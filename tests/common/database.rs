//! Database test fixtures
//!
//! Every fixture owns a fresh SQLite file in a temporary directory, so tests
//! never share state and need no cleanup.

use agora_forum::backend::db::Database;
use agora_forum::backend::forum::ForumService;
use agora_forum::backend::server::config::load_service;
use agora_forum::shared::config::ForumConfig;
use std::path::Path;
use tempfile::TempDir;

/// Lowest cost bcrypt accepts; keeps hashing fast in tests
pub const TEST_BCRYPT_COST: u32 = 4;

pub const TEST_SECRET: &str = "test-session-secret";

/// Configuration pointing at files inside `dir`
pub fn test_config(dir: &Path) -> ForumConfig {
    ForumConfig::builder()
        .listen_addr("127.0.0.1:0")
        .expect("valid test address")
        .database_path(dir.join("forum.db"))
        .session_secret(TEST_SECRET)
        .bcrypt_cost(TEST_BCRYPT_COST)
        .static_dir(dir.join("static"))
        .build()
        .expect("valid test config")
}

/// Test database fixture
pub struct TestDatabase {
    // Keeps the directory alive for the lifetime of the fixture
    _dir: TempDir,
    pub config: ForumConfig,
    db: Database,
}

impl TestDatabase {
    /// Create a new test database fixture
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = test_config(dir.path());
        let db = Database::open(&config.database_path, config.storage_timeout)
            .await
            .expect("Failed to open test database");
        Self {
            _dir: dir,
            config,
            db,
        }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn static_dir(&self) -> &Path {
        &self.config.static_dir
    }

    /// Forum service wired to this database
    pub async fn service(&self) -> ForumService {
        load_service(&self.config, self.db.clone())
            .await
            .expect("Failed to build forum service")
    }

    /// Number of rows in `table`
    pub async fn count(&self, table: &str) -> i64 {
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(self.db.pool())
            .await
            .expect("Failed to count rows");
        count
    }
}
