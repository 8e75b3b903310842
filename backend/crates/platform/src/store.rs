//! Shared-Store Abstraction
//!
//! The telemetry components coordinate across stateless server instances
//! through a shared key-value store. Each trait method corresponds to one
//! atomic batch of store commands: the batched sub-operations execute in
//! order, without interleaving from other clients, and the effects of one
//! sub-operation are visible to the next in the same batch. All
//! cross-instance correctness rests on that guarantee; the application
//! never does a client-side read-modify-write.

use thiserror::Error;

/// Shared store failure
///
/// Every variant is treated the same way by callers: log, then fall back
/// to the component's neutral result. No store error propagates to the
/// end user.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network, protocol, or server-side error from the store
    #[error("store error: {0}")]
    Backend(#[from] redis::RedisError),

    /// Batch returned fewer or differently-typed results than issued
    #[error("unexpected batch response: {0}")]
    BadResponse(String),
}

/// Atomic counter operations against the shared store
///
/// One method per atomic batch the domain needs. Implementations must
/// execute each method as a single batch (pipeline/transaction), never as
/// separate round trips.
#[trait_variant::make(CounterStore: Send)]
pub trait LocalCounterStore {
    /// Increment the integer at `key` and refresh its expiry, atomically.
    ///
    /// Returns the post-increment count. The expiry makes window counters
    /// self-deleting once their window has passed.
    async fn incr_with_ttl(&self, key: &str, ttl_secs: u64) -> Result<u64, StoreError>;

    /// Upsert `member` with `score`, drop members scored strictly below
    /// `cutoff`, and return the remaining cardinality, atomically.
    ///
    /// The purge runs after the upsert, so the cardinality always includes
    /// the member just touched.
    async fn touch_and_count(
        &self,
        set: &str,
        member: &str,
        score: i64,
        cutoff: i64,
    ) -> Result<u64, StoreError>;

    /// Drop members scored strictly below `cutoff` and return the
    /// remaining cardinality, atomically.
    async fn prune_and_count(&self, set: &str, cutoff: i64) -> Result<u64, StoreError>;

    /// Increment `member`'s score in the ranked set by 1, creating it at 1
    /// if absent.
    async fn incr_member(&self, set: &str, member: &str) -> Result<(), StoreError>;

    /// The `n` highest-scored members, descending. Ties follow the store's
    /// native ordering.
    async fn top_members(&self, set: &str, n: usize) -> Result<Vec<String>, StoreError>;
}
