use comfy_table::Cell;
use tracing::{info, warn};

use super::ui::{
    StyleType, header_cell, new_progress_bar, new_styled_table, number_cell, source_cell,
    style_text,
};
use crate::core::config::AppConfig;
use crate::core::resolver::{RateResolver, Resolution};
use crate::sync::{SyncReport, SyncSchedule, refresh_pairs, refresh_rates, run_periodic};

struct PairRow {
    pair: String,
    resolution: Resolution,
}

/// Runs one refresh batch over the configured pairs and prints what was obtained.
pub async fn sync_once(resolver: &RateResolver, config: &AppConfig) -> SyncReport {
    let pairs = refresh_pairs(&config.anchor_currencies, &config.supported_currencies);
    let pb = new_progress_bar(pairs.len() as u64);

    let mut rows = Vec::with_capacity(pairs.len());
    let report = refresh_rates(resolver, &pairs, |base, quote, resolution| {
        pb.set_message(format!("{base}->{quote}"));
        pb.inc(1);
        rows.push(PairRow {
            pair: format!("{base}->{quote}"),
            resolution: resolution.clone(),
        });
    })
    .await;
    pb.finish_and_clear();

    display_sync(&rows, &report);
    report
}

/// Refreshes every `update_interval_hours` until Ctrl-C.
pub async fn sync_forever(resolver: &RateResolver, config: &AppConfig) -> usize {
    let pairs = refresh_pairs(&config.anchor_currencies, &config.supported_currencies);
    let schedule = SyncSchedule::every(config.update_interval());
    info!(
        "Refreshing {} pairs every {} hour(s); press Ctrl-C to stop",
        pairs.len(),
        config.update_interval_hours
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Unable to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };
    run_periodic(resolver, &pairs, schedule, shutdown).await
}

fn display_sync(rows: &[PairRow], report: &SyncReport) {
    let mut table = new_styled_table();
    table.set_header(vec![
        header_cell("Pair"),
        header_cell("Rate"),
        header_cell("Source"),
        header_cell("Step"),
    ]);
    for row in rows {
        let result = row.resolution.result();
        let (rate, source, step) = match row.resolution.step() {
            Some(step) => (
                number_cell(format!("{:.4}", result.rate)),
                source_cell(Some(result.source), result.offline),
                Cell::new(step.to_string()),
            ),
            None => (number_cell("-".to_string()), source_cell(None, true), Cell::new("none")),
        };
        table.add_row(vec![Cell::new(&row.pair), rate, source, step]);
    }

    println!("\n{}", style_text("Rate refresh", StyleType::Title));
    println!("{table}");
    println!(
        "{} {} refreshed, {} up to date, {} stale, {} unknown",
        style_text("Total:", StyleType::TotalLabel),
        style_text(&report.refreshed.to_string(), StyleType::TotalValue),
        report.cached,
        report.stale,
        report.unknown
    );
    if report.is_failure() {
        println!(
            "{}",
            style_text("No provider could be reached.", StyleType::Error)
        );
    }
}
