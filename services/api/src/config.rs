use std::time::Duration;

use serde::Deserialize;

use loomap_core::config::Config;

/// API service configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing access tokens.
    pub jwt_secret: String,
    /// TCP port to listen on (default 5001). Env var: `API_PORT`.
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// Mark the access-token cookie `Secure`.
    #[serde(default)]
    pub cookie_secure: bool,
    /// Insert the campus bathrooms into an empty table at startup.
    #[serde(default = "default_true")]
    pub seed_bathrooms: bool,
    #[serde(default = "default_geocoder_url")]
    pub geocoder_url: String,
    #[serde(default = "default_geocoder_user_agent")]
    pub geocoder_user_agent: String,
    #[serde(default = "default_geocoder_timeout_secs")]
    pub geocoder_timeout_secs: u64,
}

impl Config for ApiConfig {}

impl ApiConfig {
    pub fn geocoder_timeout(&self) -> Duration {
        Duration::from_secs(self.geocoder_timeout_secs)
    }
}

fn default_api_port() -> u16 {
    5001
}

fn default_true() -> bool {
    true
}

fn default_geocoder_url() -> String {
    "https://nominatim.openstreetmap.org/search".to_owned()
}

fn default_geocoder_user_agent() -> String {
    "bathroom_map_app".to_owned()
}

fn default_geocoder_timeout_secs() -> u64 {
    10
}
