//! Presence Tracker
//!
//! Maintains a sliding window of recently-seen visitor identities in a
//! single score-sorted set, where the score is the Unix second of the last
//! heartbeat. Expiry is lazy: every touch and every read purges entries
//! older than the window before counting, so the set is self-cleaning with
//! no background sweep and no per-key TTLs.

use chrono::Utc;
use platform::store::CounterStore;
use std::sync::Arc;

use crate::application::config::StatsConfig;
use crate::application::or_neutral;
use crate::domain::identity::VisitorIdentity;

/// Sliding-window "online now" tracker
pub struct PresenceTracker<S> {
    store: Option<Arc<S>>,
    config: Arc<StatsConfig>,
}

impl<S> PresenceTracker<S>
where
    S: CounterStore + Sync,
{
    pub fn new(store: Option<Arc<S>>, config: Arc<StatsConfig>) -> Self {
        Self { store, config }
    }

    /// Record a heartbeat and return the current online count.
    ///
    /// `None` identity (unidentifiable client) writes nothing and reports
    /// the neutral count. One atomic batch: upsert the identity's score to
    /// now, purge entries older than the window, count the rest.
    pub async fn record_heartbeat(&self, identity: Option<&VisitorIdentity>) -> u64 {
        self.record_heartbeat_at(identity, Utc::now().timestamp())
            .await
    }

    /// Same as [`record_heartbeat`](Self::record_heartbeat) with an
    /// explicit instant.
    pub async fn record_heartbeat_at(
        &self,
        identity: Option<&VisitorIdentity>,
        now_secs: i64,
    ) -> u64 {
        let Some(identity) = identity else {
            tracing::debug!("Heartbeat from unidentifiable client, nothing recorded");
            return 0;
        };
        let Some(store) = &self.store else {
            return 0;
        };

        let cutoff = now_secs - self.config.presence_window_secs();
        or_neutral(
            store.touch_and_count(&self.config.presence_key, identity.as_str(), now_secs, cutoff),
            0,
            "presence heartbeat",
        )
        .await
    }

    /// Current online count.
    ///
    /// Read-only from the caller's perspective; the purge of expired
    /// entries is the side effect of lazy expiry.
    pub async fn online_count(&self) -> u64 {
        self.online_count_at(Utc::now().timestamp()).await
    }

    /// Same as [`online_count`](Self::online_count) with an explicit
    /// instant.
    pub async fn online_count_at(&self, now_secs: i64) -> u64 {
        let Some(store) = &self.store else {
            return 0;
        };

        let cutoff = now_secs - self.config.presence_window_secs();
        or_neutral(
            store.prune_and_count(&self.config.presence_key, cutoff),
            0,
            "presence count",
        )
        .await
    }
}
