use std::collections::{BTreeMap, HashMap};

use iso_currency::Currency;
use regex::Regex;

use super::{ledger_entry::Periods, note_id::NoteId};

#[derive(Debug, Clone)]
pub struct KeywordRule {
    /// Lower-cased substring searched for in the account name.
    pub keyword: String,
    pub note: NoteId,
}

impl KeywordRule {
    /// Orders rules so the most specific (longest) keyword is tried first;
    /// "trade payables" must beat "payables".
    pub(crate) fn sort_by_specificity(rules: &mut [KeywordRule]) {
        rules.sort_by(|a, b| {
            b.keyword
                .len()
                .cmp(&a.keyword.len())
                .then_with(|| a.keyword.cmp(&b.keyword))
        });
    }
}

#[derive(Debug, Clone)]
pub struct PatternRule {
    pub pattern: Regex,
    pub note: NoteId,
}

#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub name: String,
    /// Empty means the category catches every account of the note not taken
    /// by an earlier category.
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn matches(&self, account_name_lower: &str) -> bool {
        self.keywords.is_empty()
            || self
                .keywords
                .iter()
                .any(|k| account_name_lower.contains(k.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitGrouping {
    /// 1,234,567.00
    Standard,
    /// 12,34,567.00 (lakh / crore).
    Indian,
}

#[derive(Debug, Clone)]
pub struct Formatting {
    pub currency: Currency,
    pub amount_unit: String,
    pub conversion_factor: f64,
    pub decimal_places: usize,
    pub absolute_values: bool,
    pub grouping: DigitGrouping,
}

impl Formatting {
    /// Converts a raw ledger amount into the presentation unit, rounded to the
    /// configured number of decimal places.
    pub fn convert(&self, raw: f64) -> f64 {
        let value = if self.absolute_values { raw.abs() } else { raw };
        self.round(value / self.conversion_factor)
    }

    pub fn round(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.decimal_places as i32);
        let rounded = (value * scale).round() / scale;
        // Avoid printing "-0.00".
        if rounded == 0.0 {
            0.0
        } else {
            rounded
        }
    }

    pub fn fixed(&self, value: f64) -> String {
        let decimal_places = self.decimal_places;
        format!("{:.decimal_places$}", self.round(value))
    }

    pub fn half_unit(&self) -> f64 {
        0.5 * 10f64.powi(-(self.decimal_places as i32))
    }
}

#[derive(Debug, Clone)]
pub struct ValidationSettings {
    pub strict: bool,
    pub total_tolerance: Option<f64>,
}

/// The Schedule III rule set: how ledger account names map to statutory
/// notes, how accounts within a note split into categories, and how figures
/// are presented.
#[derive(Debug, Clone)]
pub struct ScheduleIiiMapping {
    /// Keyed by lower-cased account name.
    pub exact: HashMap<String, NoteId>,
    /// Keyed by lower-cased trial-balance group.
    pub groups: HashMap<String, NoteId>,
    /// Longest keyword first.
    pub keywords: Vec<KeywordRule>,
    pub patterns: Vec<PatternRule>,
    pub exclusions: HashMap<NoteId, Vec<String>>,
    pub categories: HashMap<NoteId, Vec<CategoryRule>>,
    pub note_titles: BTreeMap<NoteId, String>,
    pub fallback_note: Option<NoteId>,
    pub periods: Periods,
    pub formatting: Formatting,
    pub validation: ValidationSettings,
    pub generate_missing_templates: bool,
}

impl ScheduleIiiMapping {
    pub fn title(&self, note: &NoteId) -> Option<&str> {
        self.note_titles.get(note).map(|s| s.as_str())
    }

    /// Reverse lookup of the note titles table.
    pub fn note_for_title(&self, title: &str) -> Option<&NoteId> {
        let wanted = title.trim().to_lowercase();
        self.note_titles
            .iter()
            .find(|(_, t)| t.trim().to_lowercase() == wanted)
            .map(|(note, _)| note)
    }

    pub fn is_excluded(&self, note: &NoteId, account_name_lower: &str) -> bool {
        self.exclusions.get(note).map_or(false, |words| {
            words.iter().any(|w| account_name_lower.contains(w.as_str()))
        })
    }

    pub fn categories_for(&self, note: &NoteId) -> &[CategoryRule] {
        self.categories.get(note).map_or(&[], |c| c.as_slice())
    }

    pub fn total_tolerance(&self) -> f64 {
        self.validation
            .total_tolerance
            .unwrap_or_else(|| self.formatting.half_unit())
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::logic::test_support::test_mapping;

    use super::*;

    #[test]
    fn titles_resolve_both_ways() {
        let mapping = test_mapping();
        assert_eq!(mapping.title(&NoteId::new("16")), Some("Trade Payables"));
        assert_eq!(mapping.note_for_title("trade payables"), Some(&NoteId::new("16")));
        assert_eq!(mapping.note_for_title("  CASH AND BANK BALANCES "), Some(&NoteId::new("12")));
        assert_eq!(mapping.note_for_title("Trade Receivables"), None);
    }
}
