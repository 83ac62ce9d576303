use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to rank manufacturers against a project
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "project_id", rename = "projectId")]
    pub project_id: String,
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to record a contact with a manufacturer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "project_id", rename = "projectId")]
    pub project_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "manufacturer_id", rename = "manufacturerId")]
    pub manufacturer_id: String,
    #[serde(alias = "match_score", rename = "matchScore", default)]
    pub match_score: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
}
