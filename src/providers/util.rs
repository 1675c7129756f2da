use crate::core::currency::{LatestRates, normalize_code};
use anyhow::{Result, anyhow};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Strips whitespace, a trailing `/latest` endpoint and trailing slashes from a configured URL.
pub fn normalize_base_url(url: &str) -> String {
    const ENDPOINT: &str = "/latest";
    let mut url = url.trim();
    if let Some(cut) = url.len().checked_sub(ENDPOINT.len()) {
        if url
            .get(cut..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(ENDPOINT))
        {
            url = &url[..cut];
        }
    }
    url.trim_end_matches('/').to_string()
}

pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent("xrate/0.1")
        .timeout(timeout)
        .build()?)
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: Option<i64>,
    #[serde(rename = "type")]
    kind: Option<String>,
    info: Option<String>,
}

/// Body shared by both providers' `latest` endpoints.
#[derive(Debug, Deserialize)]
struct LatestResponse {
    success: Option<bool>,
    timestamp: Option<i64>,
    base: Option<String>,
    rates: Option<HashMap<String, f64>>,
    error: Option<ApiError>,
}

pub fn parse_latest(body: &str, provider: &str, base: &str) -> Result<LatestRates> {
    let data: LatestResponse = serde_json::from_str(body)
        .map_err(|e| anyhow!("Failed to parse {} response for {}: {}", provider, base, e))?;

    if data.success == Some(false) {
        let detail = data
            .error
            .map(|e| {
                format!(
                    "{} {}: {}",
                    e.code.map(|c| c.to_string()).unwrap_or_default(),
                    e.kind.unwrap_or_default(),
                    e.info.unwrap_or_default()
                )
            })
            .unwrap_or_else(|| "no details".to_string());
        return Err(anyhow!("{} reported failure for {}: {}", provider, base, detail.trim()));
    }

    let rates = data
        .rates
        .filter(|r| !r.is_empty())
        .ok_or_else(|| anyhow!("No rates found in {} response for {}", provider, base))?;

    Ok(LatestRates {
        base: data.base.map(|b| normalize_code(&b)),
        timestamp: data.timestamp,
        rates: rates
            .into_iter()
            .map(|(code, rate)| (normalize_code(&code), rate))
            .collect(),
    })
}
