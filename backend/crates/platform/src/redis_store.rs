//! Redis Shared-Store Implementation
//!
//! Implements [`CounterStore`](crate::store::CounterStore) over a Redis
//! connection manager. Every trait method is issued as a single
//! `MULTI`/`EXEC` pipeline, which gives the atomic-batch semantics the
//! trait requires.

use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use crate::config::StoreConfig;
use crate::store::{CounterStore, StoreError};

/// Redis-backed counter store
///
/// Cheap to clone; the underlying [`ConnectionManager`] multiplexes one
/// connection and reconnects on failure.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    prefix: String,
}

impl RedisStore {
    /// Connect to the store described by `config`.
    ///
    /// Fails fast if the URL is malformed or the initial connection cannot
    /// be established; the caller decides whether that means degraded mode
    /// or startup failure.
    pub async fn connect(config: StoreConfig) -> Result<Self, StoreError> {
        let client = redis::Client::open(config.url.as_str())?;
        let conn = client.get_connection_manager().await?;
        tracing::info!(prefix = %config.prefix, "Connected to shared store");
        Ok(Self {
            conn,
            prefix: config.prefix,
        })
    }

    fn make_key(&self, key: &str) -> String {
        format!("{}:{}", self.prefix, key)
    }
}

impl CounterStore for RedisStore {
    async fn incr_with_ttl(&self, key: &str, ttl_secs: u64) -> Result<u64, StoreError> {
        let full_key = self.make_key(key);
        let mut conn = self.conn.clone();

        let (count,): (u64,) = redis::pipe()
            .atomic()
            .incr(&full_key, 1u64)
            .expire(&full_key, ttl_secs as i64)
            .ignore()
            .query_async(&mut conn)
            .await?;

        Ok(count)
    }

    async fn touch_and_count(
        &self,
        set: &str,
        member: &str,
        score: i64,
        cutoff: i64,
    ) -> Result<u64, StoreError> {
        let full_key = self.make_key(set);
        let mut conn = self.conn.clone();

        // "(cutoff" makes the max bound exclusive: members scored exactly
        // at the cutoff survive the purge.
        let (count,): (u64,) = redis::pipe()
            .atomic()
            .zadd(&full_key, member, score)
            .ignore()
            .zrembyscore(&full_key, "-inf", format!("({cutoff}"))
            .ignore()
            .zcard(&full_key)
            .query_async(&mut conn)
            .await?;

        Ok(count)
    }

    async fn prune_and_count(&self, set: &str, cutoff: i64) -> Result<u64, StoreError> {
        let full_key = self.make_key(set);
        let mut conn = self.conn.clone();

        let (count,): (u64,) = redis::pipe()
            .atomic()
            .zrembyscore(&full_key, "-inf", format!("({cutoff}"))
            .ignore()
            .zcard(&full_key)
            .query_async(&mut conn)
            .await?;

        Ok(count)
    }

    async fn incr_member(&self, set: &str, member: &str) -> Result<(), StoreError> {
        let full_key = self.make_key(set);
        let mut conn = self.conn.clone();

        let _: f64 = conn.zincr(&full_key, member, 1i64).await?;
        Ok(())
    }

    async fn top_members(&self, set: &str, n: usize) -> Result<Vec<String>, StoreError> {
        if n == 0 {
            return Ok(Vec::new());
        }
        let full_key = self.make_key(set);
        let mut conn = self.conn.clone();

        let members: Vec<String> = conn.zrevrange(&full_key, 0, n as isize - 1).await?;
        Ok(members)
    }
}
