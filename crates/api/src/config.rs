use std::time::Duration;

use qanda_core::search::DEFAULT_FEED_LIMIT;
use qanda_core::store::DEFAULT_STORE_TIMEOUT;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Deadline applied to each individual store call.
    pub store_timeout: Duration,
    /// Topic that ranked (`scope=all`) search is restricted to. `None` searches
    /// every topic.
    pub search_topic: Option<String>,
    /// Default number of questions on a feed page (default: `10`).
    pub feed_limit: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `STORE_TIMEOUT_MS`     | `5000`                     |
    /// | `SEARCH_TOPIC`         | unset (all topics)         |
    /// | `FEED_LIMIT`           | `10`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let store_timeout = std::env::var("STORE_TIMEOUT_MS")
            .ok()
            .map(|ms| {
                Duration::from_millis(ms.parse().expect("STORE_TIMEOUT_MS must be a valid u64"))
            })
            .unwrap_or(DEFAULT_STORE_TIMEOUT);

        let search_topic = std::env::var("SEARCH_TOPIC")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let feed_limit: i64 = std::env::var("FEED_LIMIT")
            .ok()
            .map(|n| n.parse().expect("FEED_LIMIT must be a valid i64"))
            .unwrap_or(DEFAULT_FEED_LIMIT);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store_timeout,
            search_topic,
            feed_limit,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
