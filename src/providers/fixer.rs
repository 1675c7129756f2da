use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, instrument};

use super::util::{build_client, normalize_base_url, parse_latest};
use crate::core::currency::{LatestRates, LatestRatesProvider};

/// Primary provider: a keyed "latest rates" API in the fixer.io format.
pub struct FixerProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl FixerProvider {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        Ok(FixerProvider {
            base_url: normalize_base_url(base_url),
            api_key: api_key.to_string(),
            client: build_client(timeout)?,
        })
    }
}

#[async_trait]
impl LatestRatesProvider for FixerProvider {
    fn name(&self) -> &str {
        "fixer"
    }

    #[instrument(name = "FixerLatest", skip(self, symbols), fields(base = %base))]
    async fn latest(&self, base: &str, symbols: &[&str]) -> Result<LatestRates> {
        let symbols = symbols.join(",");
        let url = Url::parse_with_params(
            &format!("{}/latest", self.base_url),
            &[
                ("access_key", self.api_key.as_str()),
                ("base", base),
                ("symbols", symbols.as_str()),
                ("format", "1"),
            ],
        )?;
        debug!("Requesting latest rates from {}/latest", self.base_url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for base: {}", e, base))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for base: {}",
                response.status(),
                base
            ));
        }

        let text = response.text().await?;
        let latest = parse_latest(&text, self.name(), base)?;
        debug!(rates = ?latest.rates, provider_base = ?latest.base, "Received fixer rates");
        Ok(latest)
    }
}
