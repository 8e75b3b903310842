//! Stats - Visitor Telemetry Module
//!
//! Best-effort counters for a stateless, horizontally-scaled site backend:
//! - "Online now" presence over a sliding 5-minute window
//! - Popular search term leaderboard
//! - Weekly page-view counters namespaced by ISO week
//!
//! Structure:
//! - `domain/` - Value objects and pure derivations
//! - `application/` - Trackers orchestrating shared-store batches
//! - `presentation/` - HTTP handlers and router
//!
//! ## Failure Model
//! Every operation here is a telemetry signal, never correctness-critical
//! to the primary request: shared-store failures are logged and replaced
//! with neutral values (zero counts, empty leaderboards, no-op writes).
//! Nothing in this crate surfaces an infrastructure error to the caller.

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;

// Re-exports for convenience
pub use application::config::StatsConfig;
pub use application::page_views::PageViews;
pub use application::presence::PresenceTracker;
pub use application::search_terms::SearchTerms;
pub use domain::week::{current_week_key, week_key_at};
pub use error::{StatsError, StatsResult};
pub use presentation::router::{stats_router, stats_router_generic};
