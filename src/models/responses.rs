use crate::models::domain::ManufacturerMatch;
use serde::{Deserialize, Serialize};

/// Response for the find matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub matches: Vec<ManufacturerMatch>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Response for the contact endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(rename = "contactId")]
    pub contact_id: String,
}

/// Response listing contacted manufacturers for a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactedResponse {
    #[serde(rename = "projectId")]
    pub project_id: String,
    pub contacted: Vec<String>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
