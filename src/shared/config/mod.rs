//! Application configuration module
//!
//! Provides [`ForumConfig`], the single set of knobs the server is started
//! with: where to listen, which database file to use, how sessions are
//! signed, and how large the listings are.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default listen address
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3999";
/// Default SQLite database file
pub const DEFAULT_DATABASE_PATH: &str = "./forum.db";
/// Default directory for static assets
pub const DEFAULT_STATIC_DIR: &str = "static";
/// Default session cookie lifetime (30 days)
pub const DEFAULT_SESSION_MAX_AGE: Duration = Duration::from_secs(30 * 24 * 60 * 60);
/// Default bound on a single storage operation
pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(5);
/// Work factor bounds accepted by bcrypt
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;
/// Posts on the home feed
pub const DEFAULT_HOME_FEED_LIMIT: u32 = 10;
/// Posts returned by a search
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

/// Forum configuration
#[derive(Debug, Clone)]
pub struct ForumConfig {
    /// Address the HTTP server binds to
    pub listen_addr: SocketAddr,
    /// SQLite database file
    pub database_path: PathBuf,
    /// HMAC secret used to sign session tokens
    pub session_secret: String,
    /// Lifetime of the session cookie
    pub session_max_age: Duration,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Bound on a single storage operation
    pub storage_timeout: Duration,
    pub home_feed_limit: u32,
    pub search_limit: u32,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
}

impl ForumConfig {
    /// Create a new ForumConfigBuilder
    pub fn builder() -> ForumConfigBuilder {
        ForumConfigBuilder::default()
    }

    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to the defaults. A missing `SESSION_SECRET`
    /// is replaced by a random per-process secret, which means sessions do
    /// not survive a restart.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        if let Some(addr) = env_var("FORUM_ADDR") {
            builder = builder.listen_addr(&addr)?;
        }
        if let Some(path) = env_var("DATABASE_PATH") {
            builder = builder.database_path(path);
        }
        match env_var("SESSION_SECRET") {
            Some(secret) => builder = builder.session_secret(secret),
            None => {
                tracing::warn!("SESSION_SECRET not set; using a random secret for this process");
                builder = builder.session_secret(random_secret());
            }
        }
        if let Some(secs) = env_var("SESSION_MAX_AGE_SECS") {
            builder = builder.session_max_age(Duration::from_secs(parse("SESSION_MAX_AGE_SECS", &secs)?));
        }
        if let Some(cost) = env_var("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse("BCRYPT_COST", &cost)?);
        }
        if let Some(ms) = env_var("STORAGE_TIMEOUT_MS") {
            builder = builder.storage_timeout(Duration::from_millis(parse("STORAGE_TIMEOUT_MS", &ms)?));
        }
        if let Some(limit) = env_var("HOME_FEED_LIMIT") {
            builder = builder.home_feed_limit(parse("HOME_FEED_LIMIT", &limit)?);
        }
        if let Some(limit) = env_var("SEARCH_LIMIT") {
            builder = builder.search_limit(parse("SEARCH_LIMIT", &limit)?);
        }
        if let Some(dir) = env_var("STATIC_DIR") {
            builder = builder.static_dir(dir);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session_secret.is_empty() {
            return Err(ConfigError::MissingValue("session_secret"));
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                name: "bcrypt_cost",
                value: self.bcrypt_cost.to_string(),
            });
        }
        if self.storage_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "storage_timeout",
                value: "0".to_string(),
            });
        }
        if self.home_feed_limit == 0 || self.search_limit == 0 {
            return Err(ConfigError::InvalidValue {
                name: "limit",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for ForumConfig
#[derive(Debug, Default)]
pub struct ForumConfigBuilder {
    listen_addr: Option<SocketAddr>,
    database_path: Option<PathBuf>,
    session_secret: Option<String>,
    session_max_age: Option<Duration>,
    bcrypt_cost: Option<u32>,
    storage_timeout: Option<Duration>,
    home_feed_limit: Option<u32>,
    search_limit: Option<u32>,
    static_dir: Option<PathBuf>,
}

impl ForumConfigBuilder {
    /// Set the listen address from its textual form
    pub fn listen_addr(mut self, addr: &str) -> Result<Self, ConfigError> {
        let parsed = addr
            .parse()
            .map_err(|_| ConfigError::InvalidAddr(addr.to_string()))?;
        self.listen_addr = Some(parsed);
        Ok(self)
    }

    pub fn database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = Some(path.into());
        self
    }

    pub fn session_secret(mut self, secret: impl Into<String>) -> Self {
        self.session_secret = Some(secret.into());
        self
    }

    pub fn session_max_age(mut self, max_age: Duration) -> Self {
        self.session_max_age = Some(max_age);
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn storage_timeout(mut self, timeout: Duration) -> Self {
        self.storage_timeout = Some(timeout);
        self
    }

    pub fn home_feed_limit(mut self, limit: u32) -> Self {
        self.home_feed_limit = Some(limit);
        self
    }

    pub fn search_limit(mut self, limit: u32) -> Self {
        self.search_limit = Some(limit);
        self
    }

    pub fn static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ForumConfig, ConfigError> {
        let listen_addr = match self.listen_addr {
            Some(addr) => addr,
            None => DEFAULT_LISTEN_ADDR
                .parse()
                .map_err(|_| ConfigError::InvalidAddr(DEFAULT_LISTEN_ADDR.to_string()))?,
        };

        let config = ForumConfig {
            listen_addr,
            database_path: self
                .database_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH)),
            session_secret: self
                .session_secret
                .ok_or(ConfigError::MissingValue("session_secret"))?,
            session_max_age: self.session_max_age.unwrap_or(DEFAULT_SESSION_MAX_AGE),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(bcrypt::DEFAULT_COST),
            storage_timeout: self.storage_timeout.unwrap_or(DEFAULT_STORAGE_TIMEOUT),
            home_feed_limit: self.home_feed_limit.unwrap_or(DEFAULT_HOME_FEED_LIMIT),
            search_limit: self.search_limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
            static_dir: self
                .static_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid listen address: {0}")]
    InvalidAddr(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn parse<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}

fn random_secret() -> String {
    format!("{}{}", uuid::Uuid::new_v4().simple(), uuid::Uuid::new_v4().simple())
}
