//! Popular Search Terms Tracker
//!
//! A ranked set of normalized search terms with monotonically increasing
//! tallies. Tallies accumulate for the lifetime of the deployment; there
//! is deliberately no decay or expiry.
//!
//! This tracker does not rate-limit by itself; the presentation layer is
//! expected to gate submissions before calling [`SearchTerms::record`].

use platform::store::CounterStore;
use std::sync::Arc;

use crate::application::config::StatsConfig;
use crate::application::or_neutral;
use crate::domain::term::SearchTerm;

/// Search term leaderboard
pub struct SearchTerms<S> {
    store: Option<Arc<S>>,
    config: Arc<StatsConfig>,
}

impl<S> SearchTerms<S>
where
    S: CounterStore + Sync,
{
    pub fn new(store: Option<Arc<S>>, config: Arc<StatsConfig>) -> Self {
        Self { store, config }
    }

    /// Record a search submission, fire-and-forget.
    ///
    /// Invalid input (normalized length outside bounds) is a no-op
    /// success: validation details are not leaked to unauthenticated
    /// callers. Store failures are likewise swallowed.
    pub async fn record(&self, raw_term: &str) {
        let Some(term) = SearchTerm::new(raw_term) else {
            tracing::debug!("Rejected malformed search term, nothing recorded");
            return;
        };
        let Some(store) = &self.store else {
            return;
        };

        or_neutral(
            store.incr_member(&self.config.terms_key, term.as_str()),
            (),
            "record search term",
        )
        .await;
    }

    /// The `n` highest-tally terms, descending.
    ///
    /// Empty when the store is unavailable. Results need no real-time
    /// freshness and are safe to cache for tens of seconds.
    pub async fn top(&self, n: usize) -> Vec<String> {
        let Some(store) = &self.store else {
            return Vec::new();
        };

        or_neutral(
            store.top_members(&self.config.terms_key, n),
            Vec::new(),
            "top search terms",
        )
        .await
    }
}
