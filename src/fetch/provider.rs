use futures::future::BoxFuture;
use log::debug;
use reqwest::Client;

use crate::config::{Instrument, ProviderConfig};
use crate::error::Context;

use super::{decode_series_body, series_url, FetchResult, RawSeries, SeriesSource};

/// Fetches instrument histories over HTTP from the configured provider.
pub struct HttpSeriesSource {
    client: Client,
    config: ProviderConfig,
}

impl HttpSeriesSource {
    pub fn new(config: ProviderConfig) -> FetchResult<Self> {
        let mut builder = Client::builder().timeout(config.timeout());
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        let client = builder
            .build()
            .context("Failed to construct history HTTP client")?;

        Ok(Self { client, config })
    }

    async fn fetch_series(&self, instrument: &Instrument) -> FetchResult<RawSeries> {
        let url = series_url(&self.config, &instrument.id)?;
        debug!("Requesting history for {} from {}", instrument.id, url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("History request failed for {}", instrument.id))?
            .error_for_status()
            .with_context(|| {
                format!("History request returned error status for {}", instrument.id)
            })?;

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read history body for {}", instrument.id))?;

        let series = decode_series_body(instrument, &body)?;
        debug!(
            "Decoded {} history rows for {}",
            series.rows.len(),
            instrument.id
        );
        Ok(series)
    }
}

impl SeriesSource for HttpSeriesSource {
    fn fetch<'a>(&'a self, instrument: &'a Instrument) -> BoxFuture<'a, FetchResult<RawSeries>> {
        Box::pin(self.fetch_series(instrument))
    }
}
