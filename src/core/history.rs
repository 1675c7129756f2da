//! Session history of conversions, newest first. Not persisted.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionHistoryEntry {
    pub amount: String,
    pub source_currency: String,
    pub target_currency: String,
    pub result: String,
    pub rate: String,
    pub is_favorite: bool,
}

#[derive(Debug, Default, Clone)]
pub struct ConversionHistory {
    entries: Vec<ConversionHistoryEntry>,
}

impl ConversionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a conversion at the front of the list.
    pub fn add(&mut self, amount: &str, source: &str, target: &str, result: f64, rate: f64) {
        self.entries.insert(
            0,
            ConversionHistoryEntry {
                amount: amount.to_string(),
                source_currency: source.to_string(),
                target_currency: target.to_string(),
                result: format!("{result:.2}"),
                rate: format!("{rate:.4}"),
                is_favorite: false,
            },
        );
    }

    /// Flips the favorite flag of the entry at `index`. Returns false when out of range.
    pub fn toggle_favorite(&mut self, index: usize) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.is_favorite = !entry.is_favorite;
                true
            }
            None => false,
        }
    }

    pub fn entries(&self) -> &[ConversionHistoryEntry] {
        &self.entries
    }

    pub fn favorites(&self) -> impl Iterator<Item = &ConversionHistoryEntry> {
        self.entries.iter().filter(|e| e.is_favorite)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first_and_formatting() {
        let mut history = ConversionHistory::new();
        history.add("100", "USD", "COP", 420000.0, 4200.0);
        history.add("5", "EUR", "USD", 5.4321, 1.08642);

        assert_eq!(history.len(), 2);
        let first = &history.entries()[0];
        assert_eq!(first.source_currency, "EUR");
        assert_eq!(first.result, "5.43");
        assert_eq!(first.rate, "1.0864");
        assert!(!first.is_favorite);
        assert_eq!(history.entries()[1].result, "420000.00");
    }

    #[test]
    fn test_toggle_favorite() {
        let mut history = ConversionHistory::new();
        history.add("1", "USD", "EUR", 0.92, 0.92);
        history.add("2", "USD", "EUR", 1.84, 0.92);

        assert!(history.toggle_favorite(1));
        assert_eq!(history.favorites().count(), 1);
        assert_eq!(history.favorites().next().unwrap().amount, "1");

        assert!(history.toggle_favorite(1));
        assert_eq!(history.favorites().count(), 0);
        assert!(!history.toggle_favorite(5));
        assert_eq!(history.len(), 2);
    }
}
