//! Currency conversion abstractions and core types

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;

/// Currency used as the common anchor when deriving cross-rates.
pub const REFERENCE_CURRENCY: &str = "USD";

/// Normalizes a currency code to its canonical uppercase form.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// A base/quote pair with normalized codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RateQuery {
    pub base: String,
    pub quote: String,
}

impl RateQuery {
    pub fn new(base: &str, quote: &str) -> Self {
        Self {
            base: normalize_code(base),
            quote: normalize_code(quote),
        }
    }

    /// Symbols filter sent to providers: the base itself plus the quote.
    pub fn symbols(&self) -> [&str; 2] {
        [self.base.as_str(), self.quote.as_str()]
    }
}

impl Display for RateQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}", self.base, self.quote)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateSource {
    Primary,
    Secondary,
    Cache,
}

impl Display for RateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RateSource::Primary => "PRIMARY",
                RateSource::Secondary => "SECONDARY",
                RateSource::Cache => "CACHE",
            }
        )
    }
}

/// A resolved exchange rate along with where and when it was obtained.
///
/// A `rate` of exactly 1.0 with `source == Cache` and `offline == true` may be
/// the resolver's "nothing known" default rather than a genuine parity rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateResult {
    pub rate: f64,
    pub timestamp: DateTime<Utc>,
    pub source: RateSource,
    pub offline: bool,
}

/// Rates returned by a provider's "latest" endpoint.
///
/// `base` is the anchor the provider actually quoted against, which may differ
/// from the requested one. `timestamp` is in unix seconds when reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatestRates {
    pub base: Option<String>,
    pub timestamp: Option<i64>,
    pub rates: HashMap<String, f64>,
}

#[async_trait]
pub trait LatestRatesProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn latest(&self, base: &str, symbols: &[&str]) -> Result<LatestRates>;
}

/// Applies a percentage markup to a raw market rate.
pub fn apply_spread(rate: f64, spread_percent: f64) -> f64 {
    if spread_percent == 0.0 {
        return rate;
    }
    rate * (1.0 + spread_percent / 100.0)
}

/// Number of minor-unit digits shown for a currency.
pub fn decimals_for(code: &str) -> u32 {
    match normalize_code(code).as_str() {
        "JPY" => 0,
        "KWD" => 3,
        _ => 2,
    }
}

/// Rounds an amount to the display precision of `code`, midpoints away from zero.
pub fn round_amount(value: f64, code: &str) -> f64 {
    let dp = decimals_for(code);
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}
