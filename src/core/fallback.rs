//! Static rates shown when no live or cached rate exists for a pair.

use super::currency::normalize_code;

const FALLBACK_RATES: &[(&str, &str, f64)] = &[
    ("USD", "COP", 4200.0),
    ("COP", "USD", 0.00024),
    ("USD", "EUR", 0.92),
    ("EUR", "USD", 1.09),
    ("USD", "MXN", 17.25),
    ("MXN", "USD", 0.058),
    ("USD", "BRL", 5.0),
    ("BRL", "USD", 0.20),
    ("USD", "GBP", 0.80),
    ("GBP", "USD", 1.25),
    ("USD", "JPY", 148.0),
    ("JPY", "USD", 0.0068),
    ("USD", "CAD", 1.35),
    ("CAD", "USD", 0.74),
];

/// Looks up the static rate for a pair. A currency converts to itself at 1.0.
pub fn static_rate(from: &str, to: &str) -> Option<f64> {
    let (from, to) = (normalize_code(from), normalize_code(to));
    if from == to {
        return Some(1.0);
    }
    FALLBACK_RATES
        .iter()
        .find(|(f, t, _)| *f == from && *t == to)
        .map(|(_, _, rate)| *rate)
}
