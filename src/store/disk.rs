use crate::core::cache::{CachedRates, RateCache, cache_key};
use crate::store::crypto::CacheCipher;
use anyhow::{Context, Result};
use async_trait::async_trait;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

const PARTITION: &str = "rates";

/// Rate cache persisted in a fjall keyspace, one encrypted record per base currency.
pub struct DiskRateCache {
    keyspace: Keyspace,
    partition: PartitionHandle,
    cipher: CacheCipher,
}

impl DiskRateCache {
    pub fn open(path: &Path, cipher: CacheCipher) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create cache directory: {}", path.display()))?;
        let keyspace = fjall::Config::new(path)
            .open()
            .with_context(|| format!("Failed to open cache at {}", path.display()))?;
        let partition = keyspace.open_partition(PARTITION, PartitionCreateOptions::default())?;
        debug!("Opened rate cache at {}", path.display());

        Ok(Self {
            keyspace,
            partition,
            cipher,
        })
    }
}

#[async_trait]
impl RateCache for DiskRateCache {
    async fn save(&self, base: &str, rates: HashMap<String, f64>, timestamp: i64) -> Result<()> {
        let key = cache_key(base);
        let record = CachedRates {
            base: base.to_string(),
            timestamp,
            rates,
        };
        let plaintext = serde_json::to_vec(&record)?;
        let sealed = self.cipher.seal(key.as_bytes(), &plaintext)?;

        self.partition.insert(&key, sealed)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Cache PUT for key: {}", key);
        Ok(())
    }

    async fn load(&self, base: &str) -> Result<Option<CachedRates>> {
        let key = cache_key(base);
        let Some(sealed) = self.partition.get(&key)? else {
            debug!("Cache MISS for key: {}", key);
            return Ok(None);
        };

        // Unreadable records are treated as missing; the next successful fetch overwrites them.
        let record = self
            .cipher
            .open(key.as_bytes(), &sealed)
            .and_then(|plain| Ok(serde_json::from_slice::<CachedRates>(&plain)?));
        match record {
            Ok(record) => {
                debug!("Cache HIT for key: {}", key);
                Ok(Some(record))
            }
            Err(e) => {
                warn!("Discarding unreadable cache record {}: {}", key, e);
                Ok(None)
            }
        }
    }
}
