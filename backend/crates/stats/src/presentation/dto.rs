//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

/// Response for POST /api/stats/heartbeat and GET /api/stats/online
#[derive(Debug, Clone, Serialize)]
pub struct OnlineResponse {
    pub count: u64,
}

/// Request for POST /api/stats/search
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub term: String,
}

/// Response for GET /api/stats/search/top
#[derive(Debug, Clone, Serialize)]
pub struct TopTermsResponse {
    pub terms: Vec<String>,
}

/// Request for POST /api/stats/views
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRequest {
    pub slug: String,
}

/// Response for GET /api/stats/views/top
#[derive(Debug, Clone, Serialize)]
pub struct TopPagesResponse {
    pub pages: Vec<String>,
}

/// Query parameters for leaderboard endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct TopQuery {
    #[serde(default)]
    pub n: Option<usize>,
}
