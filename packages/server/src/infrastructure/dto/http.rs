//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Response of `GET /admin`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDto {
    pub status: String,
    pub users: Vec<String>,
    pub total_messages: usize,
    /// Seconds since the server started
    pub uptime: f64,
}
