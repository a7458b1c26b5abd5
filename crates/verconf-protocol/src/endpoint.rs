/// HTTP endpoint paths for the verconf API.
pub mod endpoints {
    pub const CREATE: &str = "/config";
    pub const UPDATE: &str = "/config/update";
    pub const ROLLBACK: &str = "/config/rollback";
    pub const FETCH: &str = "/config/fetch";
    pub const VERSIONS: &str = "/config/versions";
    pub const NAMES: &str = "/configs";
    pub const HEALTH: &str = "/health";
}

/// Health check response.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}
