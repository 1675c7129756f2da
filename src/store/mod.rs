pub mod crypto;
pub mod disk;
pub mod memory;

use crate::core::cache::RateCache;
use crate::core::config::AppConfig;
use anyhow::Result;
use crypto::CacheCipher;
use disk::DiskRateCache;
use memory::MemoryRateCache;
use std::sync::Arc;
use tracing::warn;

/// Opens the persistent rate cache under the configured data path.
pub fn open_disk_cache(config: &AppConfig) -> Result<DiskRateCache> {
    let data_path = config.default_data_path()?;
    let cipher = match config.cache_key.as_deref() {
        Some(key) if !key.trim().is_empty() => CacheCipher::from_base64(key)?,
        _ => CacheCipher::load_or_create(&data_path.join("cache.key"))?,
    };
    DiskRateCache::open(&data_path.join("cache"), cipher)
}

/// Returns the persistent cache, or an in-memory one when it can't be opened.
pub fn open_rate_cache(config: &AppConfig) -> Arc<dyn RateCache> {
    match open_disk_cache(config) {
        Ok(cache) => Arc::new(cache),
        Err(e) => {
            warn!("Persistent rate cache unavailable, using memory only: {:#}", e);
            Arc::new(MemoryRateCache::new())
        }
    }
}
