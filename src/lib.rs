pub mod cli;
pub mod core;
pub mod providers;
pub mod store;
pub mod sync;

use crate::core::config::AppConfig;
use crate::core::history::ConversionHistory;
use crate::core::resolver::RateResolver;
use anyhow::{Result, bail};
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        amount: f64,
        from: String,
        to: Vec<String>,
        favorite: bool,
        show_history: bool,
    },
    Sync {
        watch: bool,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("xrate starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(
        primary = %config.providers.primary.base_url,
        secondary = %config.providers.secondary.base_url,
        cache_ttl_hours = config.cache_ttl_hours,
        spread_percent = config.spread_percent,
        "Loaded config"
    );

    let cache = store::open_rate_cache(&config);
    let resolver = RateResolver::from_config(&config, cache)?;

    match command {
        AppCommand::Convert {
            amount,
            from,
            to,
            favorite,
            show_history,
        } => {
            cli::convert::report_unrecognized(&from, &to);
            let mut history = ConversionHistory::new();
            let conversions =
                cli::convert::convert(&resolver, amount, &from, &to, favorite, &mut history)
                    .await?;
            cli::convert::display_conversions(&conversions);
            if show_history {
                cli::convert::display_history(&history);
            }
            Ok(())
        }
        AppCommand::Sync { watch: false } => {
            let report = cli::sync::sync_once(&resolver, &config).await;
            if report.is_failure() {
                bail!(
                    "Rate refresh failed: no provider answered any of {} pairs",
                    report.attempted
                );
            }
            Ok(())
        }
        AppCommand::Sync { watch: true } => {
            cli::sync::sync_forever(&resolver, &config).await;
            Ok(())
        }
    }
}
