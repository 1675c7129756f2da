//! Background refresh of cached rates.
//!
//! A batch resolves every anchor/supported pair once so later lookups are
//! served from the cache. [`run_periodic`] repeats that on an interval and
//! retries a batch that refreshed nothing with exponential backoff.

use anyhow::{Result, bail};
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::core::currency::normalize_code;
use crate::core::resolver::{FallbackStep, RateResolver, Resolution};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub attempted: usize,
    /// Pairs answered by a provider during this batch.
    pub refreshed: usize,
    /// Pairs whose cached rates were still within the TTL.
    pub cached: usize,
    /// Pairs only answerable from expired cached rates.
    pub stale: usize,
    pub unknown: usize,
}

impl SyncReport {
    /// A batch that neither reached a provider nor found fresh rates counts as failed.
    pub fn is_failure(&self) -> bool {
        self.attempted > 0 && self.refreshed == 0 && self.cached == 0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SyncSchedule {
    pub interval: Duration,
    pub retries: usize,
    pub retry_delay: Duration,
}

impl SyncSchedule {
    pub fn every(interval: Duration) -> Self {
        Self {
            interval,
            retries: 3,
            retry_delay: Duration::from_secs(30),
        }
    }
}

/// Every (anchor, currency) pair to warm, skipping a currency against itself.
pub fn refresh_pairs(anchors: &[String], supported: &[String]) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for anchor in anchors.iter().map(|a| normalize_code(a)) {
        for quote in supported.iter().map(|s| normalize_code(s)) {
            if quote.is_empty() || quote == anchor {
                continue;
            }
            let pair = (anchor.clone(), quote);
            if !pairs.contains(&pair) {
                pairs.push(pair);
            }
        }
    }
    pairs
}

/// Resolves each pair in turn. A pair that can't be refreshed never stops the batch.
pub async fn refresh_rates<F>(
    resolver: &RateResolver,
    pairs: &[(String, String)],
    mut on_resolved: F,
) -> SyncReport
where
    F: FnMut(&str, &str, &Resolution),
{
    let mut report = SyncReport::default();
    for (base, quote) in pairs {
        let resolution = resolver.resolve_detailed(base, quote).await;
        report.attempted += 1;
        match resolution.step() {
            Some(FallbackStep::FreshCache) => report.cached += 1,
            Some(FallbackStep::StaleCache) => report.stale += 1,
            Some(_) => report.refreshed += 1,
            None => report.unknown += 1,
        }
        on_resolved(base, quote, &resolution);
    }
    debug!(?report, "Refresh batch finished");
    report
}

/// Retries an async operation with doubling delays.
///
/// # Parameters
/// - `operation`: Closure returning a future
/// - `retries`: Number of retry attempts (total runs = 1 initial + retries)
/// - `initial_delay`: Delay before the first retry; doubled after each failure
pub async fn with_backoff<F, Fut, T>(
    mut operation: F,
    retries: usize,
    initial_delay: Duration,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 1;
    let mut delay = initial_delay;
    loop {
        match operation().await {
            Ok(val) => return Ok(val),
            Err(err) => {
                if attempt > retries {
                    return Err(err);
                }
                debug!(
                    "Attempt {}/{} failed: {}. Retrying in {:?}...",
                    attempt, retries, err, delay
                );
                attempt += 1;
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
        }
    }
}

async fn run_batch(
    resolver: &RateResolver,
    pairs: &[(String, String)],
    schedule: &SyncSchedule,
) -> Result<SyncReport> {
    with_backoff(
        move || async move {
            let report = refresh_rates(resolver, pairs, |_, _, _| {}).await;
            if report.is_failure() {
                bail!("No provider answered any of {} pairs", report.attempted);
            }
            Ok(report)
        },
        schedule.retries,
        schedule.retry_delay,
    )
    .await
}

/// Refreshes on every tick of `schedule.interval` until `shutdown` resolves.
///
/// The first batch runs immediately. Shutdown also abandons a batch in flight.
/// Returns the number of batches that completed.
pub async fn run_periodic<S>(
    resolver: &RateResolver,
    pairs: &[(String, String)],
    schedule: SyncSchedule,
    shutdown: S,
) -> usize
where
    S: Future<Output = ()>,
{
    let mut ticker = tokio::time::interval(schedule.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut completed = 0;
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {}
        }

        tokio::select! {
            _ = &mut shutdown => break,
            outcome = run_batch(resolver, pairs, &schedule) => {
                completed += 1;
                match outcome {
                    Ok(report) => info!(
                        refreshed = report.refreshed,
                        cached = report.cached,
                        stale = report.stale,
                        unknown = report.unknown,
                        "Rates refreshed"
                    ),
                    Err(e) => warn!("Rate refresh failed after retries: {:#}", e),
                }
            }
        }
    }
    info!("Stopped periodic rate refresh after {} batches", completed);
    completed
}
