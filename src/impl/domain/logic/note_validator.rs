use fractic_server_error::ServerError;

use crate::{
    entities::{
        ClassifiedEntry, NoteTemplate, Period, ScheduleIiiMapping, ValidationIssue,
    },
    errors::{CategoryTotalMismatch, UnreplacedPlaceholdersRemain},
};

use super::utils::parse_figure;

pub(crate) struct NoteValidator<'a> {
    mapping: &'a ScheduleIiiMapping,
}

impl<'a> NoteValidator<'a> {
    pub(crate) fn new(mapping: &'a ScheduleIiiMapping) -> Self {
        Self { mapping }
    }

    pub(crate) fn classification_issues(&self, classified: &[ClassifiedEntry]) -> Vec<ValidationIssue> {
        classified
            .iter()
            .filter_map(|c| match (&c.note, &c.category) {
                (None, _) => Some(ValidationIssue::UnmappedAccount {
                    account_name: c.entry.account_name.clone(),
                    amount: c.entry.current,
                }),
                // Notes without configured categories have nothing to fall
                // outside of.
                (Some(note), None) if !self.mapping.categories_for(note).is_empty() => {
                    Some(ValidationIssue::UncategorizedAccount {
                        note: note.clone(),
                        account_name: c.entry.account_name.clone(),
                        amount: c.entry.current,
                    })
                }
                _ => None,
            })
            .collect()
    }

    /// Checks a filled note: every placeholder resolved, and every stated
    /// block total equal to the sum of its line items.
    pub(crate) fn note_issues(
        &self,
        note: &NoteTemplate,
        unknown_tokens: &[String],
    ) -> Vec<ValidationIssue> {
        let mut issues: Vec<ValidationIssue> = unknown_tokens
            .iter()
            .map(|token| ValidationIssue::MissingPlaceholder {
                note: note.note.clone(),
                token: token.clone(),
            })
            .collect();

        let tolerance = self.mapping.total_tolerance();
        for block in &note.structure {
            for period in [Period::Current, Period::Previous] {
                let (stated, items): (Option<&String>, Vec<Option<&String>>) = match period {
                    Period::Current => (
                        block.total.as_ref(),
                        block.subcategories.iter().map(|i| Some(&i.value)).collect(),
                    ),
                    Period::Previous => (
                        block.previous_total.as_ref(),
                        block
                            .subcategories
                            .iter()
                            .map(|i| i.previous_value.as_ref())
                            .collect(),
                    ),
                };
                let Some(stated) = stated.and_then(|s| parse_figure(s)) else {
                    continue;
                };
                // A total stated without any line values for the period is a
                // summary-only block.
                let items: Vec<Option<&String>> = items
                    .into_iter()
                    .map(|v| v.filter(|s| !s.trim().is_empty()))
                    .collect();
                if items.iter().all(Option::is_none) {
                    continue;
                }
                // Blocks with text cells (headings, unresolved tokens) are not
                // arithmetic and are skipped.
                let computed: Option<f64> = items
                    .iter()
                    .map(|v| v.map_or(Some(0.0), |s| parse_figure(s)))
                    .sum();
                let Some(computed) = computed else {
                    continue;
                };
                let computed = self.mapping.formatting.round(computed);
                if (stated - computed).abs() > tolerance {
                    issues.push(ValidationIssue::TotalMismatch {
                        note: note.note.clone(),
                        category: block.category.clone(),
                        period: self.mapping.periods.label(period).to_string(),
                        stated,
                        computed,
                    });
                }
            }
        }
        issues
    }

    /// In strict mode, turns the first blocking issue into an error.
    pub(crate) fn enforce(&self, issues: &[ValidationIssue]) -> Result<(), ServerError> {
        if !self.mapping.validation.strict {
            return Ok(());
        }
        for issue in issues {
            match issue {
                ValidationIssue::MissingPlaceholder { note, .. } => {
                    let keys = issues
                        .iter()
                        .filter_map(|i| match i {
                            ValidationIssue::MissingPlaceholder { note: n, token } if n == note => {
                                Some(token.as_str())
                            }
                            _ => None,
                        })
                        .collect::<Vec<_>>()
                        .join(", ");
                    return Err(UnreplacedPlaceholdersRemain::new(note.as_str(), &keys));
                }
                ValidationIssue::TotalMismatch {
                    note,
                    category,
                    period,
                    stated,
                    computed,
                } => {
                    return Err(CategoryTotalMismatch::new(
                        note.as_str(),
                        category,
                        period,
                        *stated,
                        *computed,
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Map;

    use super::*;
    use crate::{
        domain::logic::{
            account_classifier::AccountClassifier,
            test_support::{entry, test_mapping},
        },
        entities::{CategoryBlock, LineItem, NoteId},
    };

    fn note(values: &[&str], total: &str) -> NoteTemplate {
        NoteTemplate {
            note: NoteId::new("12"),
            title: "Cash and Bank Balances".into(),
            full_title: "12. Cash and Bank Balances".into(),
            structure: vec![CategoryBlock {
                category: "Cash and cash equivalents".into(),
                subcategories: values
                    .iter()
                    .map(|v| LineItem {
                        label: "line".into(),
                        value: v.to_string(),
                        previous_value: None,
                    })
                    .collect(),
                total: Some(total.to_string()),
                previous_total: Some("-".into()),
            }],
            metadata: Map::new(),
            notes_and_disclosures: vec![],
            markdown_content: None,
        }
    }

    #[test]
    fn consistent_totals_pass() {
        let mapping = test_mapping();
        let issues = NoteValidator::new(&mapping).note_issues(&note(&["1.25", "2.50", "-"], "3.75"), &[]);
        assert!(issues.is_empty());
    }

    #[test]
    fn detects_total_mismatch() {
        let mapping = test_mapping();
        let issues = NoteValidator::new(&mapping).note_issues(&note(&["1.25", "2.50"], "4.00"), &[]);
        assert_eq!(
            issues,
            vec![ValidationIssue::TotalMismatch {
                note: NoteId::new("12"),
                category: "Cash and cash equivalents".into(),
                period: "2024".into(),
                stated: 4.0,
                computed: 3.75,
            }]
        );
    }

    #[test]
    fn skips_non_numeric_blocks() {
        let mapping = test_mapping();
        let issues = NoteValidator::new(&mapping)
            .note_issues(&note(&["1.25", "{{missing_2024}}"], "4.00"), &["missing_2024".into()]);
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0], ValidationIssue::MissingPlaceholder { .. }));
    }

    #[test]
    fn summary_only_blocks_are_not_checked() {
        let mut mapping = test_mapping();
        let mut consumables = note(&[], "3.00");
        consumables.structure[0].category = "Consumables".into();
        consumables.structure[0].previous_total = Some("2.80".into());
        // Lines carrying only a current value.
        let mut current_only = note(&["1.25", "2.50"], "3.75");
        current_only.structure[0].previous_total = Some("2.80".into());

        for n in [&consumables, &current_only] {
            let issues = NoteValidator::new(&mapping).note_issues(n, &[]);
            assert!(issues.is_empty(), "{:?}", issues);
        }

        mapping.validation.strict = true;
        for n in [&consumables, &current_only] {
            let validator = NoteValidator::new(&mapping);
            let issues = validator.note_issues(n, &[]);
            assert!(validator.enforce(&issues).is_ok());
        }
    }

    #[test]
    fn partially_filled_previous_values_are_still_checked() {
        let mapping = test_mapping();
        let mut n = note(&["1.25", "2.50"], "3.75");
        n.structure[0].subcategories[0].previous_value = Some("1.00".into());
        n.structure[0].previous_total = Some("2.80".into());
        let issues = NoteValidator::new(&mapping).note_issues(&n, &[]);
        assert_eq!(
            issues,
            vec![ValidationIssue::TotalMismatch {
                note: NoteId::new("12"),
                category: "Cash and cash equivalents".into(),
                period: "2023".into(),
                stated: 2.8,
                computed: 1.0,
            }]
        );
    }

    #[test]
    fn strict_mode_turns_issues_into_errors() {
        let mut mapping = test_mapping();
        let issues = vec![ValidationIssue::MissingPlaceholder {
            note: NoteId::new("12"),
            token: "x_2024".into(),
        }];
        assert!(NoteValidator::new(&mapping).enforce(&issues).is_ok());
        mapping.validation.strict = true;
        assert!(NoteValidator::new(&mapping).enforce(&issues).is_err());
    }

    #[test]
    fn reports_unmapped_and_uncategorized_accounts() {
        let mapping = test_mapping();
        let classified = AccountClassifier::new(&mapping).classify(vec![
            entry("Suspense Account", 10.0),
            entry("Inventory in transit", 20.0),
            entry("Short Term Advances", 30.0),
        ]);
        let issues = NoteValidator::new(&mapping).classification_issues(&classified);
        assert_eq!(issues.len(), 2);
        assert!(matches!(issues[0], ValidationIssue::UnmappedAccount { .. }));
        assert!(matches!(
            issues[1],
            ValidationIssue::UncategorizedAccount { ref note, .. } if note.as_str() == "11"
        ));
    }
}
