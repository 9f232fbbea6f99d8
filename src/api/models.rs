use serde::{Deserialize, Serialize};

// ── Generation ──

#[derive(Debug, Deserialize, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub download_url: String,
    pub is_single_file: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

// ── Housekeeping ──

#[derive(Debug, Deserialize, Serialize)]
pub struct CleanupResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub service: String,
}
