use chrono::{DateTime, Utc};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::core::currency::RateSource;

pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Error,
    Subtle,
}

/// Renders `text` with the terminal style for its role.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Right-aligned numeric cell.
pub fn number_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Provenance cell: live rates in green, cached ones grey, unknown ones red.
pub fn source_cell(source: Option<RateSource>, offline: bool) -> Cell {
    match source {
        Some(source) if !offline => Cell::new(source.to_string()).fg(Color::Green),
        Some(source) => Cell::new(format!("{source} (offline)")).fg(Color::DarkGrey),
        None => Cell::new("N/A").fg(Color::Red),
    }
}

pub fn timestamp_cell(timestamp: DateTime<Utc>) -> Cell {
    Cell::new(timestamp.format("%Y-%m-%d %H:%M UTC").to_string()).fg(Color::DarkGrey)
}

/// Progress bar for a refresh batch; the message shows the pair in flight.
pub fn new_progress_bar(pairs: u64) -> ProgressBar {
    let pb = ProgressBar::new(pairs);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner:.green} {msg:>9} {wide_bar:.cyan/blue} {pos}/{len}")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}
