//! Application Layer - Telemetry trackers
//!
//! Each tracker wraps the shared-store batches for one counter family and
//! owns its degradation policy. The [`or_neutral`] combinator is the single
//! place where store failures are swallowed, so the "never throw, always
//! log" behavior is uniform across trackers.

pub mod config;
pub mod page_views;
pub mod presence;
pub mod search_terms;

use platform::store::StoreError;

/// Run a shared-store operation, replacing any failure with `neutral`.
///
/// The failure is logged with the operation name so degradation stays
/// visible in production even though callers never see the error.
pub(crate) async fn or_neutral<T, F>(op: F, neutral: T, what: &'static str) -> T
where
    F: Future<Output = Result<T, StoreError>>,
{
    match op.await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, op = what, "Shared store unavailable, using neutral value");
            neutral
        }
    }
}
