//! Rate Limiting Infrastructure
//!
//! Fixed-window rate limiting shared across all server instances via the
//! shared store, with a per-process in-memory fallback. The fallback keeps
//! limiting fail-open on infrastructure trouble: worst case a limit is
//! enforced per instance instead of fleet-wide, never as a hard failure.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::Utc;

use crate::client::UNKNOWN_CLIENT;
use crate::store::CounterStore;

/// Rate limit configuration
///
/// Immutable, supplied by the caller per call site.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Namespace for this call site's counters
    pub prefix: String,
    /// Maximum requests allowed in the window
    pub limit: u32,
    /// Time window duration
    pub window: Duration,
}

impl RateLimitConfig {
    pub fn new(prefix: impl Into<String>, limit: u32, window_secs: u64) -> Self {
        Self {
            prefix: prefix.into(),
            limit,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_secs(&self) -> u64 {
        self.window.as_secs()
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::new("default", 10, 60)
    }
}

/// Rate limit check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    /// Whether the request is within the limit
    pub allowed: bool,
    /// Echo of the configured limit
    pub limit: u32,
    /// Requests left in the current window
    pub remaining: u32,
    /// When the current window rolls over (ms since epoch)
    pub reset_at_ms: i64,
}

impl RateLimitResult {
    /// Result for clients that bypass limiting entirely (unknown identity).
    fn unlimited(config: &RateLimitConfig, now_ms: i64) -> Self {
        Self {
            allowed: true,
            limit: config.limit,
            remaining: config.limit,
            reset_at_ms: reset_at_ms(config, now_ms),
        }
    }

    /// Result for a window whose post-increment count is `count`.
    fn from_count(config: &RateLimitConfig, now_ms: i64, count: u64) -> Self {
        Self {
            allowed: count <= u64::from(config.limit),
            limit: config.limit,
            remaining: config.limit.saturating_sub(count.min(u64::from(u32::MAX)) as u32),
            reset_at_ms: reset_at_ms(config, now_ms),
        }
    }
}

fn window_index(config: &RateLimitConfig, now_ms: i64) -> i64 {
    now_ms / config.window_ms()
}

fn reset_at_ms(config: &RateLimitConfig, now_ms: i64) -> i64 {
    (window_index(config, now_ms) + 1) * config.window_ms()
}

/// Window key in the shared store: `rl:{prefix}:{identifier}:{window_index}`.
///
/// Keys are ephemeral; the counter's TTL equals the window length, so stale
/// windows delete themselves.
fn window_key(config: &RateLimitConfig, identifier: &str, now_ms: i64) -> String {
    format!(
        "rl:{}:{}:{}",
        config.prefix,
        identifier,
        window_index(config, now_ms)
    )
}

/// Per-process fixed-window limiter
///
/// Last-resort fallback when the shared store is unavailable or
/// unconfigured. State is an owned map, intentionally lost on restart and
/// never synchronized across instances. Pure in-memory arithmetic: never
/// fails, always returns a result.
#[derive(Debug, Default)]
pub struct MemoryRateLimiter {
    entries: Mutex<HashMap<String, (u32, i64)>>,
}

impl MemoryRateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a request for `identifier` against `config` at the current
    /// wall-clock time.
    pub fn check(&self, identifier: &str, config: &RateLimitConfig) -> RateLimitResult {
        self.check_at(identifier, config, Utc::now().timestamp_millis())
    }

    /// Same as [`check`](Self::check) with an explicit instant, so tests
    /// control the clock.
    pub fn check_at(
        &self,
        identifier: &str,
        config: &RateLimitConfig,
        now_ms: i64,
    ) -> RateLimitResult {
        let current_window = window_index(config, now_ms);
        let entry_key = format!("{}:{}", config.prefix, identifier);

        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let entry = entries.entry(entry_key).or_insert((0, current_window));
        if entry.1 != current_window {
            *entry = (0, current_window);
        }
        entry.0 = entry.0.saturating_add(1);
        let count = entry.0;
        drop(entries);

        RateLimitResult::from_count(config, now_ms, u64::from(count))
    }
}

/// Fleet-wide fixed-window limiter
///
/// Runs the same algorithm as [`MemoryRateLimiter`] against the shared
/// store, so concurrent instances observe one monotonically increasing
/// counter per window (the increment is a single atomic batch). Built
/// without a store it degrades to the in-memory limiter at construction
/// time; store errors degrade per call.
pub struct SharedRateLimiter<S> {
    store: Option<Arc<S>>,
    fallback: MemoryRateLimiter,
}

impl<S> SharedRateLimiter<S>
where
    S: CounterStore + Sync,
{
    pub fn new(store: Option<Arc<S>>) -> Self {
        if store.is_none() {
            tracing::warn!("No shared store configured, rate limits are per-instance only");
        }
        Self {
            store,
            fallback: MemoryRateLimiter::new(),
        }
    }

    /// Count a request for `identifier` against `config`.
    ///
    /// Suspends for at most one store round trip. Never fails: store
    /// errors are logged and the call falls back to the in-memory limiter
    /// with the same arguments.
    pub async fn check(&self, identifier: &str, config: &RateLimitConfig) -> RateLimitResult {
        self.check_at(identifier, config, Utc::now().timestamp_millis())
            .await
    }

    /// Same as [`check`](Self::check) with an explicit instant.
    pub async fn check_at(
        &self,
        identifier: &str,
        config: &RateLimitConfig,
        now_ms: i64,
    ) -> RateLimitResult {
        // Never penalize clients whose identity could not be resolved, and
        // skip the store round trip entirely for them.
        if identifier == UNKNOWN_CLIENT {
            return RateLimitResult::unlimited(config, now_ms);
        }

        let Some(store) = &self.store else {
            return self.fallback.check_at(identifier, config, now_ms);
        };

        let key = window_key(config, identifier, now_ms);
        match store.incr_with_ttl(&key, config.window_secs()).await {
            Ok(count) => RateLimitResult::from_count(config, now_ms, count),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    prefix = %config.prefix,
                    "Shared store rate limit check failed, using in-memory fallback"
                );
                self.fallback.check_at(identifier, config, now_ms)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    fn config() -> RateLimitConfig {
        RateLimitConfig::new("test", 3, 60)
    }

    #[test]
    fn test_memory_limiter_exhausts_window() {
        let limiter = MemoryRateLimiter::new();
        let config = config();
        let now_ms = 1_000_000;

        for expected_remaining in (0..3).rev() {
            let result = limiter.check_at("1.2.3.4", &config, now_ms);
            assert!(result.allowed);
            assert_eq!(result.remaining, expected_remaining);
            assert_eq!(result.limit, 3);
        }

        let result = limiter.check_at("1.2.3.4", &config, now_ms);
        assert!(!result.allowed);
        assert_eq!(result.remaining, 0);
    }

    #[test]
    fn test_memory_limiter_window_rollover() {
        let limiter = MemoryRateLimiter::new();
        let config = config();
        let window_ms = config.window_ms();

        for _ in 0..4 {
            limiter.check_at("1.2.3.4", &config, 10_000);
        }
        assert!(!limiter.check_at("1.2.3.4", &config, 10_000).allowed);

        // First call of the next window sees effective count 1
        let next_window = (10_000 / window_ms + 1) * window_ms;
        let result = limiter.check_at("1.2.3.4", &config, next_window);
        assert!(result.allowed);
        assert_eq!(result.remaining, 2);
    }

    #[test]
    fn test_memory_limiter_independent_identifiers() {
        let limiter = MemoryRateLimiter::new();
        let config = config();

        for _ in 0..4 {
            limiter.check_at("1.2.3.4", &config, 10_000);
        }
        assert!(!limiter.check_at("1.2.3.4", &config, 10_000).allowed);
        assert!(limiter.check_at("5.6.7.8", &config, 10_000).allowed);
    }

    #[test]
    fn test_memory_limiter_independent_prefixes() {
        let limiter = MemoryRateLimiter::new();
        let search = RateLimitConfig::new("search", 1, 60);
        let views = RateLimitConfig::new("views", 1, 60);

        assert!(limiter.check_at("1.2.3.4", &search, 10_000).allowed);
        assert!(!limiter.check_at("1.2.3.4", &search, 10_000).allowed);
        assert!(limiter.check_at("1.2.3.4", &views, 10_000).allowed);
    }

    #[test]
    fn test_reset_at_is_window_boundary() {
        let limiter = MemoryRateLimiter::new();
        let config = config();
        let result = limiter.check_at("1.2.3.4", &config, 70_000);
        // 60s windows: 70_000 is in window 1, which ends at 120_000
        assert_eq!(result.reset_at_ms, 120_000);
    }

    /// Store double that counts calls and can be switched into failure.
    #[derive(Default)]
    struct FakeStore {
        counters: Mutex<HashMap<String, u64>>,
        calls: AtomicUsize,
        failing: AtomicBool,
    }

    impl CounterStore for FakeStore {
        async fn incr_with_ttl(&self, key: &str, _ttl_secs: u64) -> Result<u64, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(StoreError::BadResponse("injected failure".into()));
            }
            let mut counters = self.counters.lock().unwrap();
            let count = counters.entry(key.to_string()).or_insert(0);
            *count += 1;
            Ok(*count)
        }

        async fn touch_and_count(
            &self,
            _set: &str,
            _member: &str,
            _score: i64,
            _cutoff: i64,
        ) -> Result<u64, StoreError> {
            unimplemented!("not used by the rate limiter")
        }

        async fn prune_and_count(&self, _set: &str, _cutoff: i64) -> Result<u64, StoreError> {
            unimplemented!("not used by the rate limiter")
        }

        async fn incr_member(&self, _set: &str, _member: &str) -> Result<(), StoreError> {
            unimplemented!("not used by the rate limiter")
        }

        async fn top_members(&self, _set: &str, _n: usize) -> Result<Vec<String>, StoreError> {
            unimplemented!("not used by the rate limiter")
        }
    }

    #[tokio::test]
    async fn test_shared_limiter_exhausts_window() {
        let store = Arc::new(FakeStore::default());
        let limiter = SharedRateLimiter::new(Some(store));
        let config = config();
        let now_ms = 1_000_000;

        for expected_remaining in (0..3).rev() {
            let result = limiter.check_at("1.2.3.4", &config, now_ms).await;
            assert!(result.allowed);
            assert_eq!(result.remaining, expected_remaining);
        }

        let result = limiter.check_at("1.2.3.4", &config, now_ms).await;
        assert!(!result.allowed);
        assert_eq!(result.remaining, 0);
    }

    #[tokio::test]
    async fn test_shared_limiter_window_rollover() {
        let store = Arc::new(FakeStore::default());
        let limiter = SharedRateLimiter::new(Some(store));
        let config = config();
        let window_ms = config.window_ms();
        let now_ms = 1_000_000;

        for _ in 0..4 {
            limiter.check_at("1.2.3.4", &config, now_ms).await;
        }
        assert!(!limiter.check_at("1.2.3.4", &config, now_ms).await.allowed);

        // The next window derives a fresh key, so its first call sees
        // effective count 1
        let next_window = (now_ms / window_ms + 1) * window_ms;
        let result = limiter.check_at("1.2.3.4", &config, next_window).await;
        assert!(result.allowed);
        assert_eq!(result.remaining, 2);
    }

    #[tokio::test]
    async fn test_shared_limiter_unknown_identity_skips_store() {
        let store = Arc::new(FakeStore::default());
        let limiter = SharedRateLimiter::new(Some(store.clone()));
        let config = config();

        for _ in 0..10 {
            let result = limiter.check_at(UNKNOWN_CLIENT, &config, 1_000_000).await;
            assert!(result.allowed);
            assert_eq!(result.remaining, config.limit);
        }
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_shared_limiter_falls_back_on_store_error() {
        let store = Arc::new(FakeStore::default());
        store.failing.store(true, Ordering::SeqCst);
        let limiter = SharedRateLimiter::new(Some(store));
        let reference = MemoryRateLimiter::new();
        let config = config();
        let now_ms = 1_000_000;

        // Pointwise identical to driving the in-memory limiter directly
        for _ in 0..5 {
            let actual = limiter.check_at("1.2.3.4", &config, now_ms).await;
            let expected = reference.check_at("1.2.3.4", &config, now_ms);
            assert_eq!(actual, expected);
        }
    }

    #[tokio::test]
    async fn test_shared_limiter_without_store_uses_memory() {
        let limiter: SharedRateLimiter<FakeStore> = SharedRateLimiter::new(None);
        let config = config();

        for _ in 0..3 {
            assert!(limiter.check_at("1.2.3.4", &config, 1_000_000).await.allowed);
        }
        assert!(!limiter.check_at("1.2.3.4", &config, 1_000_000).await.allowed);
    }
}
