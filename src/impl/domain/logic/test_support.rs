use std::collections::{BTreeMap, HashMap};

use iso_currency::Currency;
use regex::Regex;

use crate::entities::{
    CategoryRule, DigitGrouping, Formatting, KeywordRule, LedgerEntry, NoteId, PatternRule,
    Periods, ScheduleIiiMapping, ValidationSettings,
};

pub(crate) fn entry(name: &str, current: f64) -> LedgerEntry {
    LedgerEntry {
        account_name: name.to_string(),
        group: None,
        current,
        previous: None,
        source: None,
    }
}

pub(crate) fn entry_with_previous(name: &str, current: f64, previous: f64) -> LedgerEntry {
    LedgerEntry {
        previous: Some(previous),
        ..entry(name, current)
    }
}

fn category(name: &str, keywords: &[&str]) -> CategoryRule {
    CategoryRule {
        name: name.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

/// A small rule set covering every kind of rule.
pub(crate) fn test_mapping() -> ScheduleIiiMapping {
    let mut keywords: Vec<KeywordRule> = [
        ("short term advances", "14"),
        ("security deposit", "10"),
        ("fixed deposit", "12"),
        ("raw material", "11"),
        ("inventory", "11"),
        ("advances", "10"),
        ("creditor", "16"),
        ("bank", "12"),
        ("cash", "12"),
    ]
    .into_iter()
    .map(|(k, n)| KeywordRule {
        keyword: k.to_string(),
        note: NoteId::new(n),
    })
    .collect();
    KeywordRule::sort_by_specificity(&mut keywords);

    ScheduleIiiMapping {
        exact: HashMap::from([("deposits (asset)".to_string(), NoteId::new("10"))]),
        groups: HashMap::from([("sundry creditors".to_string(), NoteId::new("16"))]),
        keywords,
        patterns: vec![PatternRule {
            pattern: Regex::new(r"\b(petty|till|vault)\b").unwrap(),
            note: NoteId::new("12"),
        }],
        exclusions: HashMap::from([(NoteId::new("10"), vec!["short term".to_string()])]),
        categories: HashMap::from([
            (
                NoteId::new("11"),
                vec![
                    category("raw_materials", &["raw material"]),
                    category("consumables", &["consumables"]),
                ],
            ),
            (
                NoteId::new("12"),
                vec![
                    category("fixed_deposits", &["fixed deposit"]),
                    category("bank_balances", &["bank"]),
                    category("cash_on_hand", &["cash"]),
                ],
            ),
            (NoteId::new("16"), vec![category("others", &[])]),
        ]),
        note_titles: BTreeMap::from([
            (NoteId::new("10"), "Long Term Loans and Advances".to_string()),
            (NoteId::new("11"), "Inventories".to_string()),
            (NoteId::new("12"), "Cash and Bank Balances".to_string()),
            (NoteId::new("14"), "Short-term Loans and Advances".to_string()),
            (NoteId::new("16"), "Trade Payables".to_string()),
        ]),
        fallback_note: None,
        periods: Periods {
            current: "2024".to_string(),
            previous: "2023".to_string(),
        },
        formatting: Formatting {
            currency: Currency::INR,
            amount_unit: "lakhs".to_string(),
            conversion_factor: 100000.0,
            decimal_places: 2,
            absolute_values: true,
            grouping: DigitGrouping::Indian,
        },
        validation: ValidationSettings {
            strict: false,
            total_tolerance: None,
        },
        generate_missing_templates: true,
    }
}
