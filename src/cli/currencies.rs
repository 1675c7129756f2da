use comfy_table::Cell;

use super::ui::{StyleType, header_cell, new_styled_table, style_text};
use crate::core::catalog::{self, Currency};

/// Lists the catalog entries matching `query` (all of them when it is absent).
pub fn list_currencies(query: Option<&str>) -> Vec<&'static Currency> {
    catalog::search(query.unwrap_or_default())
}

pub fn display_currencies(currencies: &[&Currency], query: Option<&str>) {
    let title = match query {
        Some(q) if !q.trim().is_empty() => format!("Currencies matching \"{}\"", q.trim()),
        _ => "Currencies".to_string(),
    };
    println!("\n{}", style_text(&title, StyleType::Title));

    if currencies.is_empty() {
        println!("{}", style_text("No matching currencies.", StyleType::Subtle));
        return;
    }

    let mut table = new_styled_table();
    table.set_header(vec![header_cell(""), header_cell("Code"), header_cell("Name")]);
    for c in currencies {
        table.add_row(vec![Cell::new(c.flag), Cell::new(c.code), Cell::new(c.name)]);
    }
    println!("{table}");
    println!(
        "{} {}",
        style_text("Total:", StyleType::TotalLabel),
        style_text(&currencies.len().to_string(), StyleType::TotalValue)
    );
}
