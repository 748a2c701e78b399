use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base origin for join links (`{join_base_url}/meeting/{id}`).
    pub join_base_url: String,

    /// Origin of the hosted video platform API.
    pub video_api_base_url: String,

    // Secrets are stored outside this struct at rest.
    #[serde(default)]
    pub api_key_present: bool,
}
