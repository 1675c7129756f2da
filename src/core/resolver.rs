//! Exchange-rate resolution through an ordered fallback chain.
//!
//! A query walks [`FallbackStep::CHAIN`] until one step yields a rate:
//!
//! 1. a cached rate younger than the configured TTL
//! 2. the primary provider
//! 3. the secondary provider
//! 4. a cross-rate through [`REFERENCE_CURRENCY`] from the secondary provider
//! 5. a cached rate of any age
//!
//! When every step comes up empty the resolver returns an identity rate
//! tagged as [`Resolution::Unknown`]. Resolution itself never fails; provider
//! and cache errors are logged and treated as "no result" for that step.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::core::cache::{CachedRates, RateCache};
use crate::core::config::AppConfig;
use crate::core::currency::{
    LatestRates, LatestRatesProvider, REFERENCE_CURRENCY, RateQuery, RateResult, RateSource,
    apply_spread,
};
use crate::providers::{ExchangeHostProvider, FixerProvider};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverSettings {
    pub cache_ttl: chrono::Duration,
    pub spread_percent: f64,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            cache_ttl: chrono::Duration::hours(1),
            spread_percent: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackStep {
    FreshCache,
    Primary,
    Secondary,
    CrossRate,
    StaleCache,
}

impl FallbackStep {
    pub const CHAIN: [FallbackStep; 5] = [
        FallbackStep::FreshCache,
        FallbackStep::Primary,
        FallbackStep::Secondary,
        FallbackStep::CrossRate,
        FallbackStep::StaleCache,
    ];
}

impl Display for FallbackStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                FallbackStep::FreshCache => "fresh cache",
                FallbackStep::Primary => "primary provider",
                FallbackStep::Secondary => "secondary provider",
                FallbackStep::CrossRate => "cross-rate",
                FallbackStep::StaleCache => "stale cache",
            }
        )
    }
}

/// Outcome of a resolution, tagged with the step that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved {
        step: FallbackStep,
        result: RateResult,
    },
    /// Nothing was known about the pair; the result carries the identity rate.
    Unknown(RateResult),
}

impl Resolution {
    pub fn result(&self) -> &RateResult {
        match self {
            Resolution::Resolved { result, .. } | Resolution::Unknown(result) => result,
        }
    }

    pub fn into_result(self) -> RateResult {
        match self {
            Resolution::Resolved { result, .. } | Resolution::Unknown(result) => result,
        }
    }

    pub fn step(&self) -> Option<FallbackStep> {
        match self {
            Resolution::Resolved { step, .. } => Some(*step),
            Resolution::Unknown(_) => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Resolution::Unknown(_))
    }
}

/// A rate derived from a provider response, with the map to cache for the base.
#[derive(Debug, Clone, PartialEq)]
pub struct Derived {
    pub rate: f64,
    pub rates: HashMap<String, f64>,
}

fn usable(rate: f64) -> bool {
    rate.is_finite() && rate > 0.0
}

/// Derives the `base -> quote` rate from a "latest" response.
///
/// Providers on a fixed free-tier anchor answer relative to their own base, so
/// the rate is `rates[quote] / rates[base]` unless the response is already
/// anchored at `base`; only that one rate is cached. A response without a
/// `base` field and without a usable `rates[base]` is taken as already relative
/// to `base`, and its whole map is cached.
///
/// Dividing the whole map by `rates[base]` can't rescue a foreign-anchored
/// response here: it needs the same usable `rates[base]` and `rates[quote]` as
/// the single-rate division.
pub fn derive_rate(latest: &LatestRates, base: &str, quote: &str) -> Option<Derived> {
    let quote_rate = latest.rates.get(quote).copied().filter(|r| usable(*r))?;
    let base_rate = latest.rates.get(base).copied().filter(|r| usable(*r));
    let single = |rate: f64| Derived {
        rate,
        rates: HashMap::from([(quote.to_string(), rate)]),
    };

    match (latest.base.as_deref(), base_rate) {
        (Some(provider_base), _) if provider_base == base => Some(single(quote_rate)),
        (_, Some(rb)) => Some(single(quote_rate / rb)),
        (Some(_), None) => None,
        (None, None) => Some(Derived {
            rate: quote_rate,
            rates: latest.rates.clone(),
        }),
    }
}

/// Cross-rate from a response anchored at a third currency.
pub fn derive_cross_rate(latest: &LatestRates, base: &str, quote: &str) -> Option<f64> {
    let quote_rate = latest.rates.get(quote).copied().filter(|r| usable(*r))?;
    let base_rate = latest.rates.get(base).copied().filter(|r| usable(*r))?;
    Some(quote_rate / base_rate)
}

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub struct RateResolver {
    primary: Arc<dyn LatestRatesProvider>,
    secondary: Arc<dyn LatestRatesProvider>,
    cache: Arc<dyn RateCache>,
    settings: ResolverSettings,
    clock: Clock,
}

impl RateResolver {
    pub fn new(
        primary: Arc<dyn LatestRatesProvider>,
        secondary: Arc<dyn LatestRatesProvider>,
        cache: Arc<dyn RateCache>,
        settings: ResolverSettings,
    ) -> Self {
        Self {
            primary,
            secondary,
            cache,
            settings,
            clock: Arc::new(Utc::now),
        }
    }

    /// Builds a resolver against the configured HTTP providers.
    pub fn from_config(config: &AppConfig, cache: Arc<dyn RateCache>) -> Result<Self> {
        let timeout = config.request_timeout();
        let primary = FixerProvider::new(
            &config.providers.primary.base_url,
            &config.providers.primary.api_key,
            timeout,
        )?;
        let secondary = ExchangeHostProvider::new(&config.providers.secondary.base_url, timeout)?;
        let settings = ResolverSettings {
            cache_ttl: config.cache_ttl(),
            spread_percent: config.spread_percent,
        };
        Ok(Self::new(
            Arc::new(primary),
            Arc::new(secondary),
            cache,
            settings,
        ))
    }

    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    fn spread(&self, rate: f64) -> f64 {
        apply_spread(rate, self.settings.spread_percent)
    }

    pub async fn resolve(&self, base: &str, quote: &str) -> RateResult {
        self.resolve_detailed(base, quote).await.into_result()
    }

    #[instrument(name = "ResolveRate", skip(self))]
    pub async fn resolve_detailed(&self, base: &str, quote: &str) -> Resolution {
        let query = RateQuery::new(base, quote);

        for step in FallbackStep::CHAIN {
            if let Some(result) = self.attempt(step, &query).await {
                debug!(%query, %step, rate = result.rate, "Rate resolved");
                return Resolution::Resolved { step, result };
            }
        }

        // The spread applies to the identity default as well; callers see the same markup everywhere.
        warn!("No rate available for {}, returning identity rate", query);
        Resolution::Unknown(RateResult {
            rate: self.spread(1.0),
            timestamp: self.now(),
            source: RateSource::Cache,
            offline: true,
        })
    }

    async fn attempt(&self, step: FallbackStep, query: &RateQuery) -> Option<RateResult> {
        match step {
            FallbackStep::FreshCache => self.from_cache(query, true).await,
            FallbackStep::Primary => {
                self.from_provider(self.primary.as_ref(), RateSource::Primary, query)
                    .await
            }
            FallbackStep::Secondary => {
                self.from_provider(self.secondary.as_ref(), RateSource::Secondary, query)
                    .await
            }
            FallbackStep::CrossRate => self.from_cross_rate(query).await,
            FallbackStep::StaleCache => self.from_cache(query, false).await,
        }
    }

    async fn load_cached(&self, base: &str) -> Option<CachedRates> {
        match self.cache.load(base).await {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Failed to read cached rates for {}: {:#}", base, e);
                None
            }
        }
    }

    async fn store(&self, base: &str, rates: HashMap<String, f64>, timestamp: DateTime<Utc>) {
        if let Err(e) = self
            .cache
            .save(base, rates, timestamp.timestamp_millis())
            .await
        {
            warn!("Failed to cache rates for {}: {:#}", base, e);
        }
    }

    async fn from_cache(&self, query: &RateQuery, fresh_only: bool) -> Option<RateResult> {
        let entry = self.load_cached(&query.base).await?;
        let timestamp = DateTime::<Utc>::from_timestamp_millis(entry.timestamp)?;

        if fresh_only && self.now() - timestamp > self.settings.cache_ttl {
            debug!("Cached rates for {} are stale", query.base);
            return None;
        }

        let rate = entry.rates.get(&query.quote).copied()?;
        Some(RateResult {
            rate: self.spread(rate),
            timestamp,
            source: RateSource::Cache,
            offline: true,
        })
    }

    async fn from_provider(
        &self,
        provider: &dyn LatestRatesProvider,
        source: RateSource,
        query: &RateQuery,
    ) -> Option<RateResult> {
        let latest = match provider.latest(&query.base, &query.symbols()).await {
            Ok(latest) => latest,
            Err(e) => {
                debug!("{} failed for {}: {:#}", provider.name(), query, e);
                return None;
            }
        };

        let Some(derived) = derive_rate(&latest, &query.base, &query.quote) else {
            debug!("{} returned no usable rate for {}", provider.name(), query);
            return None;
        };

        let timestamp = latest
            .timestamp
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .unwrap_or_else(|| self.now());
        self.store(&query.base, derived.rates, timestamp).await;

        Some(RateResult {
            rate: self.spread(derived.rate),
            timestamp,
            source,
            offline: false,
        })
    }

    async fn from_cross_rate(&self, query: &RateQuery) -> Option<RateResult> {
        let latest = match self
            .secondary
            .latest(REFERENCE_CURRENCY, &query.symbols())
            .await
        {
            Ok(latest) => latest,
            Err(e) => {
                debug!("Cross-rate lookup failed for {}: {:#}", query, e);
                return None;
            }
        };

        let rate = derive_cross_rate(&latest, &query.base, &query.quote)?;
        let timestamp = self.now();
        self.store(
            &query.base,
            HashMap::from([(query.quote.clone(), rate)]),
            timestamp,
        )
        .await;

        Some(RateResult {
            rate: self.spread(rate),
            timestamp,
            source: RateSource::Secondary,
            offline: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryRateCache;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn rates(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn latest(provider_base: Option<&str>, pairs: &[(&str, f64)]) -> LatestRates {
        LatestRates {
            base: provider_base.map(str::to_string),
            timestamp: None,
            rates: rates(pairs),
        }
    }

    /// Answers by requested anchor; anything else fails like an unreachable host.
    #[derive(Default)]
    struct MockProvider {
        responses: HashMap<String, LatestRates>,
        call_count: AtomicUsize,
    }

    impl MockProvider {
        fn failing() -> Arc<Self> {
            Arc::new(Self::default())
        }

        fn answering(anchor: &str, response: LatestRates) -> Arc<Self> {
            let mut provider = Self::default();
            provider.responses.insert(anchor.to_string(), response);
            Arc::new(provider)
        }

        fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LatestRatesProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn latest(&self, base: &str, _symbols: &[&str]) -> Result<LatestRates> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.responses
                .get(base)
                .cloned()
                .ok_or_else(|| anyhow!("connection refused"))
        }
    }

    struct BrokenCache;

    #[async_trait]
    impl RateCache for BrokenCache {
        async fn save(&self, _: &str, _: HashMap<String, f64>, _: i64) -> Result<()> {
            Err(anyhow!("disk full"))
        }

        async fn load(&self, _: &str) -> Result<Option<CachedRates>> {
            Err(anyhow!("corrupt"))
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    fn resolver(
        primary: &Arc<MockProvider>,
        secondary: &Arc<MockProvider>,
        cache: Arc<dyn RateCache>,
        spread_percent: f64,
    ) -> RateResolver {
        let settings = ResolverSettings {
            cache_ttl: chrono::Duration::hours(1),
            spread_percent,
        };
        RateResolver::new(primary.clone(), secondary.clone(), cache, settings).with_clock(now)
    }

    #[tokio::test]
    async fn test_fresh_cache_skips_network() {
        let cache = Arc::new(MemoryRateCache::new());
        let cached_at = now() - chrono::Duration::minutes(30);
        cache
            .save("EUR", rates(&[("COP", 4500.0)]), cached_at.timestamp_millis())
            .await
            .unwrap();
        let primary = MockProvider::failing();
        let secondary = MockProvider::failing();

        let resolution = resolver(&primary, &secondary, cache, 0.0)
            .resolve_detailed("EUR", "COP")
            .await;

        assert_eq!(resolution.step(), Some(FallbackStep::FreshCache));
        let result = resolution.result();
        assert_eq!(result.rate, 4500.0);
        assert_eq!(result.source, RateSource::Cache);
        assert!(result.offline);
        assert_eq!(result.timestamp, cached_at);
        assert_eq!(primary.calls(), 0);
        assert_eq!(secondary.calls(), 0);
    }

    #[tokio::test]
    async fn test_cache_exactly_ttl_old_is_fresh() {
        let cache = Arc::new(MemoryRateCache::new());
        let primary = MockProvider::failing();
        let secondary = MockProvider::failing();
        cache
            .save(
                "EUR",
                rates(&[("COP", 4500.0)]),
                (now() - chrono::Duration::hours(1)).timestamp_millis(),
            )
            .await
            .unwrap();

        let resolution = resolver(&primary, &secondary, cache.clone(), 0.0)
            .resolve_detailed("EUR", "COP")
            .await;
        assert_eq!(resolution.step(), Some(FallbackStep::FreshCache));
        assert_eq!(primary.calls(), 0);

        // One millisecond past the TTL is stale
        cache
            .save(
                "EUR",
                rates(&[("COP", 4500.0)]),
                (now() - chrono::Duration::hours(1)).timestamp_millis() - 1,
            )
            .await
            .unwrap();
        let resolution = resolver(&primary, &secondary, cache, 0.0)
            .resolve_detailed("EUR", "COP")
            .await;
        assert_eq!(resolution.step(), Some(FallbackStep::StaleCache));
        assert_eq!(primary.calls(), 1);
    }

    #[tokio::test]
    async fn test_primary_anchored_at_base() {
        let cache = Arc::new(MemoryRateCache::new());
        let mut response = latest(Some("EUR"), &[("EUR", 1.0), ("COP", 4500.0)]);
        response.timestamp = Some(1_700_000_000);
        let primary = MockProvider::answering("EUR", response);
        let secondary = MockProvider::failing();

        let result = resolver(&primary, &secondary, cache.clone(), 0.0)
            .resolve("EUR", "COP")
            .await;

        assert_eq!(result.rate, 4500.0);
        assert_eq!(result.source, RateSource::Primary);
        assert!(!result.offline);
        assert_eq!(result.timestamp.timestamp(), 1_700_000_000);
        assert_eq!(secondary.calls(), 0);

        let cached = cache.load("EUR").await.unwrap().unwrap();
        assert_eq!(cached.rates, rates(&[("COP", 4500.0)]));
        assert_eq!(cached.timestamp, 1_700_000_000_000);
    }

    #[tokio::test]
    async fn test_primary_anchor_mismatch_derives_cross_rate() {
        let cache = Arc::new(MemoryRateCache::new());
        let primary = MockProvider::answering(
            "EUR",
            latest(Some("USD"), &[("USD", 1.0), ("EUR", 0.9), ("COP", 4000.0)]),
        );
        let secondary = MockProvider::failing();

        let result = resolver(&primary, &secondary, cache.clone(), 0.0)
            .resolve("EUR", "COP")
            .await;

        assert!((result.rate - 4444.444).abs() < 0.001);
        assert_eq!(result.source, RateSource::Primary);
        // No provider timestamp, so the acquisition time is now
        assert_eq!(result.timestamp, now());

        let cached = cache.load("EUR").await.unwrap().unwrap();
        assert_eq!(cached.rates.len(), 1);
        assert!((cached.rates["COP"] - 4444.444).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_secondary_used_when_primary_fails() {
        let cache = Arc::new(MemoryRateCache::new());
        let primary = MockProvider::failing();
        let secondary = MockProvider::answering(
            "EUR",
            latest(Some("EUR"), &[("EUR", 1.0), ("COP", 4510.0)]),
        );

        let resolution = resolver(&primary, &secondary, cache, 0.0)
            .resolve_detailed("eur", "cop")
            .await;

        assert_eq!(resolution.step(), Some(FallbackStep::Secondary));
        assert_eq!(resolution.result().rate, 4510.0);
        assert_eq!(resolution.result().source, RateSource::Secondary);
        assert!(!resolution.result().offline);
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
    }

    #[tokio::test]
    async fn test_cross_rate_via_reference_currency() {
        let cache = Arc::new(MemoryRateCache::new());
        let primary = MockProvider::failing();
        let secondary = MockProvider::answering(
            "USD",
            latest(Some("USD"), &[("USD", 1.0), ("EUR", 0.9), ("COP", 4000.0)]),
        );

        let resolution = resolver(&primary, &secondary, cache.clone(), 0.0)
            .resolve_detailed("EUR", "COP")
            .await;

        assert_eq!(resolution.step(), Some(FallbackStep::CrossRate));
        let result = resolution.result();
        assert!((result.rate - 4444.444).abs() < 0.001);
        assert_eq!(result.source, RateSource::Secondary);
        assert!(!result.offline);
        // One call anchored at EUR, one at USD
        assert_eq!(secondary.calls(), 2);
        assert!(cache.load("EUR").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_stale_cache_when_network_fails() {
        let cache = Arc::new(MemoryRateCache::new());
        let cached_at = now() - chrono::Duration::hours(5);
        cache
            .save("EUR", rates(&[("COP", 4300.0)]), cached_at.timestamp_millis())
            .await
            .unwrap();
        let primary = MockProvider::failing();
        let secondary = MockProvider::failing();

        let resolution = resolver(&primary, &secondary, cache, 0.0)
            .resolve_detailed("EUR", "COP")
            .await;

        assert_eq!(resolution.step(), Some(FallbackStep::StaleCache));
        assert_eq!(resolution.result().rate, 4300.0);
        assert_eq!(resolution.result().source, RateSource::Cache);
        assert!(resolution.result().offline);
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 2);
    }

    #[tokio::test]
    async fn test_stale_cache_is_refreshed_from_network() {
        let cache = Arc::new(MemoryRateCache::new());
        let cached_at = now() - chrono::Duration::hours(2);
        cache
            .save("EUR", rates(&[("COP", 4300.0)]), cached_at.timestamp_millis())
            .await
            .unwrap();
        let primary = MockProvider::answering(
            "EUR",
            latest(Some("EUR"), &[("EUR", 1.0), ("COP", 4500.0)]),
        );
        let secondary = MockProvider::failing();

        let result = resolver(&primary, &secondary, cache.clone(), 0.0)
            .resolve("EUR", "COP")
            .await;

        assert_eq!(result.rate, 4500.0);
        assert_eq!(result.source, RateSource::Primary);
        let cached = cache.load("EUR").await.unwrap().unwrap();
        assert_eq!(cached.timestamp, now().timestamp_millis());
    }

    #[tokio::test]
    async fn test_fresh_entry_without_quote_goes_to_network() {
        let cache = Arc::new(MemoryRateCache::new());
        cache
            .save("EUR", rates(&[("MXN", 19.5)]), now().timestamp_millis())
            .await
            .unwrap();
        let primary = MockProvider::answering(
            "EUR",
            latest(Some("EUR"), &[("EUR", 1.0), ("COP", 4500.0)]),
        );
        let secondary = MockProvider::failing();

        let result = resolver(&primary, &secondary, cache.clone(), 0.0)
            .resolve("EUR", "COP")
            .await;

        assert_eq!(result.source, RateSource::Primary);
        assert_eq!(primary.calls(), 1);
        // The save replaced the previous map instead of merging into it
        let cached = cache.load("EUR").await.unwrap().unwrap();
        assert!(!cached.rates.contains_key("MXN"));
    }

    #[tokio::test]
    async fn test_unknown_when_everything_fails() {
        let cache = Arc::new(MemoryRateCache::new());
        let primary = MockProvider::failing();
        let secondary = MockProvider::failing();

        let resolution = resolver(&primary, &secondary, cache, 0.0)
            .resolve_detailed("EUR", "COP")
            .await;

        assert!(resolution.is_unknown());
        assert_eq!(resolution.step(), None);
        assert_eq!(
            resolution.into_result(),
            RateResult {
                rate: 1.0,
                timestamp: now(),
                source: RateSource::Cache,
                offline: true,
            }
        );
    }

    #[tokio::test]
    async fn test_spread_applies_to_every_result() {
        let primary = MockProvider::answering(
            "EUR",
            latest(Some("EUR"), &[("EUR", 1.0), ("COP", 100.0)]),
        );
        let secondary = MockProvider::failing();
        let result = resolver(&primary, &secondary, Arc::new(MemoryRateCache::new()), 2.0)
            .resolve("EUR", "COP")
            .await;
        assert!((result.rate - 102.0).abs() < 1e-9);

        let failing = MockProvider::failing();
        let result = resolver(&failing, &failing, Arc::new(MemoryRateCache::new()), 2.0)
            .resolve("EUR", "COP")
            .await;
        assert!((result.rate - 1.02).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_cache_errors_do_not_change_result() {
        let primary = MockProvider::answering(
            "EUR",
            latest(Some("EUR"), &[("EUR", 1.0), ("COP", 4500.0)]),
        );
        let secondary = MockProvider::failing();

        let result = resolver(&primary, &secondary, Arc::new(BrokenCache), 0.0)
            .resolve("EUR", "COP")
            .await;

        assert_eq!(result.rate, 4500.0);
        assert_eq!(result.source, RateSource::Primary);
    }

    #[test]
    fn test_derive_rate_normalizes_unanchored_map() {
        let derived = derive_rate(&latest(None, &[("COP", 4500.0), ("MXN", 19.5)]), "EUR", "COP")
            .expect("rate derived");
        assert_eq!(derived.rate, 4500.0);
        assert_eq!(derived.rates, rates(&[("COP", 4500.0), ("MXN", 19.5)]));
    }

    #[test]
    fn test_derive_rate_unanchored_with_base_rate_divides() {
        let derived = derive_rate(
            &latest(None, &[("EUR", 0.9), ("COP", 4000.0)]),
            "EUR",
            "COP",
        )
        .expect("rate derived");
        assert!((derived.rate - 4444.444).abs() < 0.001);
        assert_eq!(derived.rates.len(), 1);
    }

    #[test]
    fn test_derive_rate_rejects_unusable_responses() {
        // Anchor rate missing for a foreign base
        assert!(derive_rate(&latest(Some("USD"), &[("COP", 4000.0)]), "EUR", "COP").is_none());
        // Zero anchor rate
        assert!(
            derive_rate(
                &latest(Some("USD"), &[("EUR", 0.0), ("COP", 4000.0)]),
                "EUR",
                "COP"
            )
            .is_none()
        );
        // Quote missing
        assert!(derive_rate(&latest(Some("EUR"), &[("EUR", 1.0)]), "EUR", "COP").is_none());
        assert!(
            derive_cross_rate(&latest(Some("USD"), &[("COP", 4000.0)]), "EUR", "COP").is_none()
        );
    }
}
