use axum::Json;
use serde::Serialize;

pub const APPLICATION_NAME: &str = "RecipeYouLove API";
pub const API_VERSION: &str = "1.0.0";

/// Body of `GET /api/status`
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusInfo {
    pub application_name: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

impl Default for StatusInfo {
    fn default() -> Self {
        Self {
            application_name: APPLICATION_NAME,
            version: API_VERSION,
            status: "Running",
        }
    }
}

pub async fn home() -> &'static str {
    "RecipeYouLove API is running successfully!"
}

pub async fn health() -> &'static str {
    "Application is healthy"
}

pub async fn api_status() -> Json<StatusInfo> {
    Json(StatusInfo::default())
}
