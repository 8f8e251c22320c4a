use reqwest::Url;

use crate::config::ProviderConfig;
use crate::error::Context;

use super::FetchResult;

/// Build the history download URL for one instrument id.
pub fn series_url(config: &ProviderConfig, id: &str) -> FetchResult<Url> {
    let mut query: Vec<(&str, &str)> = config
        .extra_query
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    query.push((config.id_param.as_str(), id));

    let url = Url::parse_with_params(&config.endpoint, &query)
        .with_context(|| format!("Invalid provider endpoint: {}", config.endpoint))?;
    Ok(url)
}
