use std::{fs, path::Path};

use serde::Deserialize;

use crate::error::{Context, Result};

use super::{validator, ProviderConfig};

/// Partial provider override; absent fields keep the builtin value.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProviderConfig {
    endpoint: Option<String>,
    id_param: Option<String>,
    extra_query: Option<Vec<(String, String)>>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

impl RawProviderConfig {
    fn into_provider_config(self) -> ProviderConfig {
        let builtin = ProviderConfig::builtin();
        ProviderConfig {
            endpoint: self.endpoint.unwrap_or(builtin.endpoint),
            id_param: self.id_param.unwrap_or(builtin.id_param),
            extra_query: self.extra_query.unwrap_or(builtin.extra_query),
            timeout_secs: self.timeout_secs.unwrap_or(builtin.timeout_secs),
            user_agent: self.user_agent.or(builtin.user_agent),
        }
    }
}

/// Load a provider override file and merge it over the builtin provider.
pub fn load_provider_config(path: &Path) -> Result<ProviderConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read provider config at {}", path.display()))?;
    parse_provider_config(&json)
        .with_context(|| format!("invalid provider config at {}", path.display()))
        .map_err(Into::into)
}

fn parse_provider_config(json: &str) -> Result<ProviderConfig> {
    let raw: RawProviderConfig =
        serde_json::from_str(json).context("failed to parse provider config JSON")?;
    let config = raw.into_provider_config();
    validator::validate_provider_config(&config)?;
    Ok(config)
}
