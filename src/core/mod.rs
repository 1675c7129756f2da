//! Core business logic abstractions

pub mod cache;
pub mod catalog;
pub mod config;
pub mod currency;
pub mod fallback;
pub mod history;
pub mod log;
pub mod resolver;

// Re-export main types for cleaner imports
pub use cache::{CachedRates, RateCache};
pub use currency::{LatestRates, LatestRatesProvider, RateQuery, RateResult, RateSource};
pub use resolver::{FallbackStep, RateResolver, Resolution, ResolverSettings};
