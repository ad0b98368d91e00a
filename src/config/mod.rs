//! Configuration management for the unfurl service
//!
//! Configuration is loaded once at startup from a TOML file or from
//! environment variables. The cache core itself only ever reads resolved
//! values (`default_max_age()`, `request_timeout()`); connection parameters
//! for the database and Redis backends are passed through to whichever
//! store implementation the embedding application wires up.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Application-level settings
    #[serde(default)]
    pub app: AppConfig,

    /// Database connection settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Redis connection settings
    #[serde(default)]
    pub redis: RedisConfig,

    /// Metadata cache behaviour
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Application-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address and port to listen on
    pub listen: String,

    /// Number of worker routines to spawn
    #[serde(rename = "workerCount")]
    pub worker_count: usize,
}

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string
    pub url: String,

    /// Timeout (in seconds) for establishing a connection
    pub connect_timeout: u64,

    /// Number of connections in the pool
    pub pool_size: usize,
}

/// Redis connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Redis server addresses
    #[serde(rename = "redis")]
    pub addrs: Vec<String>,

    /// Connection pool size
    pub pool_size: usize,

    /// Maximum seconds to wait when establishing a connection
    pub dial_timeout: u64,

    /// Maximum seconds to wait for a read
    pub read_timeout: u64,

    /// Maximum seconds to wait for a write
    pub write_timeout: u64,
}

/// Metadata cache behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Default freshness window in seconds; records older than this are
    /// re-scraped on the next read
    pub max_age_secs: u64,

    /// HTTP request timeout in seconds for the page extractor
    pub request_timeout_secs: u64,

    /// User agent the extractor identifies itself with
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen: String::from("127.0.0.1:8080"),
            worker_count: 4,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::from("mongodb://localhost:27017/unfurl"),
            connect_timeout: 10,
            pool_size: 10,
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            addrs: vec![String::from("127.0.0.1:6379")],
            pool_size: 10,
            dial_timeout: 5,
            read_timeout: 3,
            write_timeout: 3,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_age_secs: 3600,
            request_timeout_secs: 30,
            user_agent: format!("unfurl/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(listen) = std::env::var("UNFURL_LISTEN") {
            config.app.listen = listen;
        }
        if let Some(count) = env_parse::<usize>("UNFURL_WORKER_COUNT") {
            config.app.worker_count = count;
        }
        if let Ok(url) = std::env::var("UNFURL_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
            config.database.url = url;
        }
        if let Some(timeout) = env_parse::<u64>("UNFURL_DATABASE_CONNECT_TIMEOUT") {
            config.database.connect_timeout = timeout;
        }
        if let Some(size) = env_parse::<usize>("UNFURL_DATABASE_POOL_SIZE") {
            config.database.pool_size = size;
        }
        if let Ok(addrs) = std::env::var("UNFURL_REDIS_ADDRS") {
            config.redis.addrs = addrs.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Some(secs) = env_parse::<u64>("UNFURL_CACHE_MAX_AGE") {
            config.cache.max_age_secs = secs;
        }
        if let Some(secs) = env_parse::<u64>("UNFURL_REQUEST_TIMEOUT") {
            config.cache.request_timeout_secs = secs;
        }
        if let Ok(agent) = std::env::var("UNFURL_USER_AGENT") {
            config.cache.user_agent = agent;
        }

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.app.worker_count == 0 {
            anyhow::bail!("workerCount must be greater than 0");
        }

        if self.app.listen.is_empty() {
            anyhow::bail!("listen address must not be empty");
        }

        if self.database.pool_size == 0 {
            anyhow::bail!("database pool_size must be greater than 0");
        }

        if self.redis.addrs.is_empty() {
            anyhow::bail!("at least one Redis address is required");
        }

        if self.redis.pool_size == 0 {
            anyhow::bail!("redis pool_size must be greater than 0");
        }

        if self.cache.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        // chrono durations are stored as signed milliseconds; anything
        // larger would wrap at conversion time instead of failing here.
        if self.cache.max_age_secs > (i64::MAX / 1000) as u64 {
            anyhow::bail!("max_age_secs is too large");
        }

        Ok(())
    }

    /// Default freshness window for cached records
    #[must_use]
    pub fn default_max_age(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.cache.max_age_secs as i64)
    }

    /// HTTP request timeout for the page extractor
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.cache.request_timeout_secs)
    }

    /// Timeout for establishing a database connection
    #[must_use]
    pub fn database_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.database.connect_timeout)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
