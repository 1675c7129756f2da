use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, instrument};

use super::util::{build_client, normalize_base_url, parse_latest};
use crate::core::currency::{LatestRates, LatestRatesProvider};

/// Secondary provider: the keyless exchangerate.host style API.
pub struct ExchangeHostProvider {
    base_url: String,
    client: reqwest::Client,
}

impl ExchangeHostProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(ExchangeHostProvider {
            base_url: normalize_base_url(base_url),
            client: build_client(timeout)?,
        })
    }
}

#[async_trait]
impl LatestRatesProvider for ExchangeHostProvider {
    fn name(&self) -> &str {
        "exchange_host"
    }

    #[instrument(name = "ExchangeHostLatest", skip(self, symbols), fields(base = %base))]
    async fn latest(&self, base: &str, symbols: &[&str]) -> Result<LatestRates> {
        let symbols = symbols.join(",");
        let url = Url::parse_with_params(
            &format!("{}/latest", self.base_url),
            &[("base", base), ("symbols", symbols.as_str())],
        )?;
        debug!("Requesting latest rates from {}", url);

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
        parse_latest(&text, self.name(), base)
    }
}
