use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateSwapRequest {
    pub skills_offered: String,
    pub skills_wanted: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedSwapResponse {
    pub message: &'static str,
    pub request_id: i64,
}
