use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Prefix of the storage key under which a base currency's rates are kept.
pub const KEY_PREFIX: &str = "rates_";

pub fn cache_key(base: &str) -> String {
    format!("{KEY_PREFIX}{base}")
}

/// The persisted rate record for one base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedRates {
    pub base: String,
    /// Milliseconds since the unix epoch.
    pub timestamp: i64,
    pub rates: HashMap<String, f64>,
}

/// Durable store of the most recent rate map per base currency.
///
/// `save` replaces any existing record for `base` wholesale.
#[async_trait]
pub trait RateCache: Send + Sync {
    async fn save(&self, base: &str, rates: HashMap<String, f64>, timestamp: i64) -> Result<()>;

    async fn load(&self, base: &str) -> Result<Option<CachedRates>>;
}
