use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use comfy_table::{Cell, Color};
use tracing::{debug, info, warn};

use super::ui::{
    StyleType, header_cell, new_styled_table, number_cell, source_cell, style_text, timestamp_cell,
};
use crate::core::catalog;
use crate::core::currency::{RateSource, decimals_for, normalize_code, round_amount};
use crate::core::fallback::static_rate;
use crate::core::history::ConversionHistory;
use crate::core::resolver::{RateResolver, Resolution};

/// How the rate used for a conversion was obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateOrigin {
    Resolved {
        source: RateSource,
        offline: bool,
        timestamp: DateTime<Utc>,
    },
    /// Nothing was known; a built-in rate was substituted.
    StaticFallback,
    /// Nothing was known and no built-in rate exists; the identity rate was used.
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub rate: f64,
    pub converted: f64,
    pub origin: RateOrigin,
}

/// Applies a resolution to an amount, substituting static rates when nothing is known.
pub fn compute_conversion(amount: f64, from: &str, to: &str, resolution: &Resolution) -> Conversion {
    let (from, to) = (normalize_code(from), normalize_code(to));
    let result = resolution.result();

    let (rate, origin) = if resolution.is_unknown() {
        match static_rate(&from, &to) {
            Some(rate) => (rate, RateOrigin::StaticFallback),
            None => (result.rate, RateOrigin::Unknown),
        }
    } else {
        (
            result.rate,
            RateOrigin::Resolved {
                source: result.source,
                offline: result.offline,
                timestamp: result.timestamp,
            },
        )
    };

    Conversion {
        converted: round_amount(amount * rate, &to),
        from,
        to,
        amount,
        rate,
        origin,
    }
}

/// Warning for codes missing from the currency catalog, if any.
pub fn unrecognized_warning(from: &str, targets: &[String]) -> Option<String> {
    let unknown =
        catalog::unrecognized(std::iter::once(from).chain(targets.iter().map(String::as_str)));
    if unknown.is_empty() {
        return None;
    }
    Some(format!(
        "Unrecognized currency code(s): {}. Run `xrate currencies` to list known codes.",
        unknown.join(", ")
    ))
}

/// Converts `amount` into every target currency, recording each conversion in `history`.
/// With `favorite`, the recorded entries are marked as favorites.
pub async fn convert(
    resolver: &RateResolver,
    amount: f64,
    from: &str,
    targets: &[String],
    favorite: bool,
    history: &mut ConversionHistory,
) -> Result<Vec<Conversion>> {
    if !amount.is_finite() || amount <= 0.0 {
        bail!("Amount must be a positive number, got {}", amount);
    }
    if targets.is_empty() {
        bail!("At least one target currency is required");
    }

    let mut conversions = Vec::with_capacity(targets.len());
    for to in targets {
        let resolution = resolver.resolve_detailed(from, to).await;
        let conversion = compute_conversion(amount, from, to, &resolution);
        debug!(?conversion, "Computed conversion");
        history.add(
            &amount.to_string(),
            &conversion.from,
            &conversion.to,
            conversion.converted,
            conversion.rate,
        );
        if favorite {
            history.toggle_favorite(0);
        }
        conversions.push(conversion);
    }
    info!("Converted {} {} into {} currencies", amount, from, conversions.len());
    Ok(conversions)
}

/// Logs and prints the unrecognized-code warning before any lookup happens.
pub fn report_unrecognized(from: &str, targets: &[String]) {
    if let Some(message) = unrecognized_warning(from, targets) {
        warn!("{}", message);
        println!("{}", style_text(&message, StyleType::Error));
    }
}

pub fn display_conversions(conversions: &[Conversion]) {
    let mut table = new_styled_table();
    table.set_header(vec![
        header_cell("From"),
        header_cell("To"),
        header_cell("Amount"),
        header_cell("Rate"),
        header_cell("Result"),
        header_cell("Source"),
        header_cell("Updated"),
    ]);

    let mut degraded = false;
    for c in conversions {
        let dp = decimals_for(&c.to) as usize;
        let (source, updated) = match c.origin {
            RateOrigin::Resolved {
                source,
                offline,
                timestamp,
            } => (source_cell(Some(source), offline), timestamp_cell(timestamp)),
            RateOrigin::StaticFallback => {
                degraded = true;
                (Cell::new("fallback rates"), Cell::new("-"))
            }
            RateOrigin::Unknown => {
                degraded = true;
                (source_cell(None, true), Cell::new("-"))
            }
        };
        table.add_row(vec![
            Cell::new(&c.from),
            Cell::new(&c.to),
            number_cell(format!("{:.2}", c.amount)),
            number_cell(format!("{:.4}", c.rate)),
            number_cell(format!("{:.*}", dp, c.converted)),
            source,
            updated,
        ]);
    }

    println!("\n{}", style_text("Conversion", StyleType::Title));
    println!("{table}");
    if degraded {
        println!(
            "{}",
            style_text(
                "No live or cached rate was available for some pairs; results are approximate.",
                StyleType::Error
            )
        );
    }
}

pub fn display_history(history: &ConversionHistory) {
    println!("\n{}", style_text("History", StyleType::Title));
    if history.is_empty() {
        println!("{}", style_text("No conversions yet.", StyleType::Subtle));
        return;
    }

    let mut table = new_styled_table();
    table.set_header(vec![
        header_cell("Amount"),
        header_cell("From"),
        header_cell("To"),
        header_cell("Result"),
        header_cell("Rate"),
        header_cell("★"),
    ]);
    for entry in history.entries() {
        let star = if entry.is_favorite {
            Cell::new("★").fg(Color::Yellow)
        } else {
            Cell::new("")
        };
        table.add_row(vec![
            number_cell(entry.amount.clone()),
            Cell::new(&entry.source_currency),
            Cell::new(&entry.target_currency),
            number_cell(entry.result.clone()),
            number_cell(entry.rate.clone()),
            star,
        ]);
    }
    println!("{table}");
    let favorites = history.favorites().count();
    if favorites > 0 {
        println!(
            "{} {}",
            style_text("Favorites:", StyleType::TotalLabel),
            style_text(&favorites.to_string(), StyleType::TotalValue)
        );
    }
}
