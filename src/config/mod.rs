use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod loader;
pub mod params;
pub mod validator;

pub use loader::load_provider_config;
pub use params::{Instrument, Params};
pub use validator::{validate_params, validate_provider_config};

pub const DEFAULT_ENDPOINT: &str = "http://apl.morningstar.co.jp/webasp/shinkin/download.aspx";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Remote history provider: one GET per instrument against `endpoint`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub endpoint: String,
    /// Query parameter carrying the instrument id.
    pub id_param: String,
    /// Fixed query pairs sent ahead of the id.
    pub extra_query: Vec<(String, String)>,
    pub timeout_secs: u64,
    pub user_agent: Option<String>,
}

impl ProviderConfig {
    pub fn builtin() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            id_param: "fnc".to_string(),
            extra_query: vec![("type".to_string(), "1".to_string())],
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::builtin()
    }
}
