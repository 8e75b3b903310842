//! Platform Configuration
//!
//! Environment-driven configuration for the shared store connection.

use std::env;

/// Shared store connection configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Redis connection URL
    pub url: String,
    /// Key namespace prepended to every key this deployment writes
    pub prefix: String,
}

impl StoreConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            prefix: "site".to_string(),
        }
    }

    pub fn with_prefix(url: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            prefix: prefix.into(),
        }
    }

    /// Read the store configuration from the environment.
    ///
    /// Returns `None` when `REDIS_URL` is unset. That is a recognized
    /// degraded mode, not an error: callers route counters to their
    /// in-process fallbacks and the server starts normally.
    pub fn from_env() -> Option<Self> {
        let url = env::var("REDIS_URL").ok()?;
        if url.trim().is_empty() {
            return None;
        }
        let prefix = env::var("REDIS_PREFIX").unwrap_or_else(|_| "site".to_string());
        Some(Self::with_prefix(url, prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_config_new() {
        let config = StoreConfig::new("redis://127.0.0.1:6379");
        assert_eq!(config.url, "redis://127.0.0.1:6379");
        assert_eq!(config.prefix, "site");
    }

    #[test]
    fn test_store_config_with_prefix() {
        let config = StoreConfig::with_prefix("redis://localhost:6379", "folio");
        assert_eq!(config.prefix, "folio");
    }
}
