//! HTTP Handlers

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use platform::client::{client_identifier, extract_client_ip};
use platform::rate_limit::{RateLimitConfig, SharedRateLimiter};
use platform::store::CounterStore;
use std::sync::Arc;

use crate::application::config::StatsConfig;
use crate::application::page_views::PageViews;
use crate::application::presence::PresenceTracker;
use crate::application::search_terms::SearchTerms;
use crate::domain::identity::VisitorIdentity;
use crate::error::{StatsError, StatsResult};
use crate::presentation::dto::{
    OnlineResponse, SearchRequest, TopPagesResponse, TopQuery, TopTermsResponse, ViewRequest,
};

/// Hard ceiling on leaderboard queries regardless of `?n=`
const TOP_QUERY_MAX: usize = 50;

/// Shared state for stats handlers
pub struct StatsAppState<S> {
    pub presence: Arc<PresenceTracker<S>>,
    pub search: Arc<SearchTerms<S>>,
    pub views: Arc<PageViews<S>>,
    pub limiter: Arc<SharedRateLimiter<S>>,
    pub config: Arc<StatsConfig>,
}

// Manual impl: cloning the state must not require S: Clone
impl<S> Clone for StatsAppState<S> {
    fn clone(&self) -> Self {
        Self {
            presence: self.presence.clone(),
            search: self.search.clone(),
            views: self.views.clone(),
            limiter: self.limiter.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S> StatsAppState<S>
where
    S: CounterStore + Sync,
{
    /// Gate a mutating endpoint behind a fixed-window rate limit.
    async fn enforce_limit(
        &self,
        headers: &HeaderMap,
        addr: std::net::SocketAddr,
        config: &RateLimitConfig,
    ) -> StatsResult<()> {
        let identifier = client_identifier(headers, Some(addr.ip()));
        let result = self.limiter.check(&identifier, config).await;
        if !result.allowed {
            return Err(StatsError::RateLimited {
                limit: result.limit,
                remaining: result.remaining,
                reset_at_ms: result.reset_at_ms,
            });
        }
        Ok(())
    }
}

/// POST /api/stats/heartbeat
pub async fn record_heartbeat<S>(
    State(state): State<StatsAppState<S>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
) -> Json<OnlineResponse>
where
    S: CounterStore + Sync + Send + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));
    let identity = VisitorIdentity::resolve(&state.config.identity_salt, client_ip);

    let count = state.presence.record_heartbeat(identity.as_ref()).await;

    Json(OnlineResponse { count })
}

/// GET /api/stats/online
pub async fn online_count<S>(State(state): State<StatsAppState<S>>) -> Json<OnlineResponse>
where
    S: CounterStore + Sync + Send + 'static,
{
    let count = state.presence.online_count().await;
    Json(OnlineResponse { count })
}

/// POST /api/stats/search
pub async fn record_search<S>(
    State(state): State<StatsAppState<S>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<SearchRequest>,
) -> StatsResult<impl IntoResponse>
where
    S: CounterStore + Sync + Send + 'static,
{
    state
        .enforce_limit(&headers, addr, &state.config.search_rate_limit)
        .await?;

    state.search.record(&req.term).await;

    // Fire-and-forget: recording already succeeded or degraded silently
    Ok(StatusCode::ACCEPTED)
}

/// GET /api/stats/search/top
pub async fn top_terms<S>(
    State(state): State<StatsAppState<S>>,
    Query(query): Query<TopQuery>,
) -> Json<TopTermsResponse>
where
    S: CounterStore + Sync + Send + 'static,
{
    let n = query
        .n
        .unwrap_or(state.config.top_default)
        .min(TOP_QUERY_MAX);
    let terms = state.search.top(n).await;
    Json(TopTermsResponse { terms })
}

/// POST /api/stats/views
pub async fn record_view<S>(
    State(state): State<StatsAppState<S>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<ViewRequest>,
) -> StatsResult<impl IntoResponse>
where
    S: CounterStore + Sync + Send + 'static,
{
    state
        .enforce_limit(&headers, addr, &state.config.views_rate_limit)
        .await?;

    state.views.record_view(&req.slug).await;

    Ok(StatusCode::ACCEPTED)
}

/// GET /api/stats/views/top
pub async fn top_pages<S>(
    State(state): State<StatsAppState<S>>,
    Query(query): Query<TopQuery>,
) -> Json<TopPagesResponse>
where
    S: CounterStore + Sync + Send + 'static,
{
    let n = query
        .n
        .unwrap_or(state.config.top_default)
        .min(TOP_QUERY_MAX);
    let pages = state.views.top_pages(n).await;
    Json(TopPagesResponse { pages })
}
