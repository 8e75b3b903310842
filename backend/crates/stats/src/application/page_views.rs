//! Weekly Page View Counters
//!
//! Per-slug view tallies bucketed by ISO week: each week gets its own
//! ranked set named by the week key, so a weekly aggregate reader can
//! consume finished buckets without any windowing logic of its own.

use chrono::{DateTime, Utc};
use platform::store::CounterStore;
use std::sync::Arc;

use crate::application::or_neutral;
use crate::domain::slug::PageSlug;
use crate::domain::week::week_key_at;

/// Weekly page-view tracker
pub struct PageViews<S> {
    store: Option<Arc<S>>,
}

impl<S> PageViews<S>
where
    S: CounterStore + Sync,
{
    pub fn new(store: Option<Arc<S>>) -> Self {
        Self { store }
    }

    /// Record one view of `raw_slug` in the current week's bucket.
    ///
    /// Invalid slugs and store failures are both no-op successes.
    pub async fn record_view(&self, raw_slug: &str) {
        self.record_view_at(raw_slug, Utc::now()).await;
    }

    /// Same as [`record_view`](Self::record_view) with an explicit instant.
    pub async fn record_view_at(&self, raw_slug: &str, at: DateTime<Utc>) {
        let Some(slug) = PageSlug::new(raw_slug) else {
            tracing::debug!("Rejected malformed page slug, nothing recorded");
            return;
        };
        let Some(store) = &self.store else {
            return;
        };

        or_neutral(
            store.incr_member(&week_key_at(at), slug.as_str()),
            (),
            "record page view",
        )
        .await;
    }

    /// The `n` most viewed slugs of the current week, descending.
    pub async fn top_pages(&self, n: usize) -> Vec<String> {
        self.top_pages_at(n, Utc::now()).await
    }

    /// Same as [`top_pages`](Self::top_pages) with an explicit instant.
    pub async fn top_pages_at(&self, n: usize, at: DateTime<Utc>) -> Vec<String> {
        let Some(store) = &self.store else {
            return Vec::new();
        };

        or_neutral(
            store.top_members(&week_key_at(at), n),
            Vec::new(),
            "top pages",
        )
        .await
    }
}
