//! Stats Error Types
//!
//! The telemetry core itself never fails toward the caller; the only error
//! the presentation layer produces is the rate-limit rejection, which is a
//! policy decision rather than a failure.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Stats-specific result type alias
pub type StatsResult<T> = Result<T, StatsError>;

/// Presentation-layer errors
#[derive(Debug, Error)]
pub enum StatsError {
    /// Rate limit exceeded for this client and call site
    #[error("Rate limit exceeded")]
    RateLimited {
        limit: u32,
        remaining: u32,
        reset_at_ms: i64,
    },
}

impl StatsError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            StatsError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    fn log(&self) {
        match self {
            StatsError::RateLimited { reset_at_ms, .. } => {
                tracing::warn!(reset_at_ms, "Stats rate limit exceeded");
            }
        }
    }
}

impl IntoResponse for StatsError {
    fn into_response(self) -> Response {
        self.log();
        match self {
            StatsError::RateLimited {
                limit,
                remaining,
                reset_at_ms,
            } => (
                StatusCode::TOO_MANY_REQUESTS,
                [
                    ("X-RateLimit-Limit", limit.to_string()),
                    ("X-RateLimit-Remaining", remaining.to_string()),
                    ("X-RateLimit-Reset", reset_at_ms.to_string()),
                ],
                // Empty body; the headers carry the backoff information
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_maps_to_429() {
        let err = StatsError::RateLimited {
            limit: 10,
            remaining: 0,
            reset_at_ms: 60_000,
        };
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_rate_limited_response_headers() {
        let err = StatsError::RateLimited {
            limit: 10,
            remaining: 0,
            reset_at_ms: 60_000,
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let headers = response.headers();
        assert_eq!(headers["X-RateLimit-Limit"], "10");
        assert_eq!(headers["X-RateLimit-Remaining"], "0");
        assert_eq!(headers["X-RateLimit-Reset"], "60000");
    }
}
