use crate::core::cache::{CachedRates, RateCache, cache_key};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory rate cache. Contents are lost when the process exits.
#[derive(Clone, Default)]
pub struct MemoryRateCache {
    inner: Arc<Mutex<HashMap<String, CachedRates>>>,
}

impl MemoryRateCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RateCache for MemoryRateCache {
    async fn save(&self, base: &str, rates: HashMap<String, f64>, timestamp: i64) -> Result<()> {
        let key = cache_key(base);
        let record = CachedRates {
            base: base.to_string(),
            timestamp,
            rates,
        };
        let mut cache = self.inner.lock().await;
        debug!("Cache PUT for key: {}", key);
        cache.insert(key, record);
        Ok(())
    }

    async fn load(&self, base: &str) -> Result<Option<CachedRates>> {
        let key = cache_key(base);
        let cache = self.inner.lock().await;
        let value = cache.get(&key).cloned();
        if value.is_some() {
            debug!("Cache HIT for key: {}", key);
        } else {
            debug!("Cache MISS for key: {}", key);
        }
        Ok(value)
    }
}
