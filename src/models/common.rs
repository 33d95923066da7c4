use serde::{Deserialize, Serialize};

/// Raw pagination query parameters as they arrive on the wire.
/// Missing or junk values are fine; Paginate::new normalizes them.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PaginationQuery {
    #[serde(default)]
    pub limit: i64,
    #[serde(default)]
    pub page: i64,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}
