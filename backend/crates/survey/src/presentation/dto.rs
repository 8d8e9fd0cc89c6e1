//! API DTOs (Data Transfer Objects)

use serde::Serialize;

/// Response for GET /ping
#[derive(Debug, Clone, Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub message: &'static str,
    /// RFC 3339 UTC timestamp with microseconds
    pub utc_time: String,
}

/// Response for a recorded submission (201)
#[derive(Debug, Clone, Serialize)]
pub struct SubmitResponse {
    pub status: &'static str,
}

/// Body of every 4xx response from the survey routes
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse<D> {
    pub error: &'static str,
    pub detail: D,
}

impl<D> ErrorResponse<D> {
    pub fn new(error: &'static str, detail: D) -> Self {
        Self { error, detail }
    }
}
