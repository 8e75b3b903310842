//! Application Configuration
//!
//! Configuration for the telemetry trackers.

use platform::rate_limit::RateLimitConfig;
use std::env;
use std::time::Duration;

/// Stats application configuration
#[derive(Debug, Clone)]
pub struct StatsConfig {
    /// Sliding presence window; entries older than this are expired
    pub presence_window: Duration,
    /// Sorted-set key holding presence entries
    pub presence_key: String,
    /// Ranked-set key holding search term tallies
    pub terms_key: String,
    /// Default leaderboard size for top-terms and top-pages queries
    pub top_default: usize,
    /// Salt mixed into visitor identity hashes
    pub identity_salt: String,
    /// Rate limit applied to search submissions
    pub search_rate_limit: RateLimitConfig,
    /// Rate limit applied to page-view recordings
    pub views_rate_limit: RateLimitConfig,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            presence_window: Duration::from_secs(300),
            presence_key: "presence:online".to_string(),
            terms_key: "search:popular".to_string(),
            top_default: 8,
            identity_salt: String::new(),
            search_rate_limit: RateLimitConfig::new("search", 10, 60),
            views_rate_limit: RateLimitConfig::new("views", 60, 60),
        }
    }
}

impl StatsConfig {
    /// Build the config from the environment.
    ///
    /// Only the identity salt comes from the environment (`IDENTITY_SALT`);
    /// the window and key constants are deployment-invariant. An unset salt
    /// leaves identity hashes stable across deployments, so it is loudly
    /// flagged rather than defaulted silently.
    pub fn from_env() -> Self {
        let identity_salt = env::var("IDENTITY_SALT").unwrap_or_default();
        if identity_salt.is_empty() {
            tracing::warn!(
                "IDENTITY_SALT is not set, visitor identity hashes are unsalted"
            );
        }
        Self {
            identity_salt,
            ..Self::default()
        }
    }

    pub fn presence_window_secs(&self) -> i64 {
        self.presence_window.as_secs() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_is_five_minutes() {
        let config = StatsConfig::default();
        assert_eq!(config.presence_window_secs(), 300);
    }

    #[test]
    fn test_default_leaderboard_size() {
        assert_eq!(StatsConfig::default().top_default, 8);
    }
}
