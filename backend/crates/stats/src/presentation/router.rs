//! Stats Router

use axum::{
    Router,
    routing::{get, post},
};
use platform::rate_limit::SharedRateLimiter;
use platform::redis_store::RedisStore;
use platform::store::CounterStore;
use std::sync::Arc;

use crate::application::config::StatsConfig;
use crate::application::page_views::PageViews;
use crate::application::presence::PresenceTracker;
use crate::application::search_terms::SearchTerms;
use crate::presentation::handlers::{self, StatsAppState};

/// Create the stats router backed by Redis.
///
/// `None` for the store runs the whole router in degraded mode: counts
/// read as zero, leaderboards as empty, and rate limits are enforced
/// per instance by the in-memory fallback.
pub fn stats_router(store: Option<RedisStore>, config: StatsConfig) -> Router {
    stats_router_generic(store.map(Arc::new), config)
}

/// Create a stats router for any counter store implementation
pub fn stats_router_generic<S>(store: Option<Arc<S>>, config: StatsConfig) -> Router
where
    S: CounterStore + Sync + Send + 'static,
{
    let config = Arc::new(config);
    let state = StatsAppState {
        presence: Arc::new(PresenceTracker::new(store.clone(), config.clone())),
        search: Arc::new(SearchTerms::new(store.clone(), config.clone())),
        views: Arc::new(PageViews::new(store.clone())),
        limiter: Arc::new(SharedRateLimiter::new(store)),
        config,
    };

    Router::new()
        .route("/heartbeat", post(handlers::record_heartbeat::<S>))
        .route("/online", get(handlers::online_count::<S>))
        .route("/search", post(handlers::record_search::<S>))
        .route("/search/top", get(handlers::top_terms::<S>))
        .route("/views", post(handlers::record_view::<S>))
        .route("/views/top", get(handlers::top_pages::<S>))
        .with_state(state)
}
