use std::sync::LazyLock;

use regex::Regex;

use crate::entities::{GeneratedNotes, NoteTemplate, ScheduleIiiMapping};

use super::utils::{format_amount, format_cell};

const LABEL_WIDTH: usize = 44;
const AMOUNT_WIDTH: usize = 16;
const WRAP_WIDTH: usize = 74;
const RULE_WIDTH: usize = 74;
const MAX_UNMAPPED_SHOWN: usize = 10;

/// Column-header rows ("March 31, 2024") that some templates carry in place
/// of real line items.
static DATE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{1,2},?\s+\d{4}|\d{1,2}(?:st|nd|rd|th)?\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*,?\s+\d{4}|\d{1,2}[/.-]\d{1,2}[/.-]\d{2,4}|\d{4}-\d{2}-\d{2})\s*$",
    )
    .expect("hardcoded regex should be valid")
});

pub(crate) struct NotesSummaryPrinter;

impl NotesSummaryPrinter {
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn print_summary(&self, generated: &GeneratedNotes) -> String {
        let mut out = String::new();

        out.push_str("--- Mapping statistics ------------------------------------------------------\n\n");
        self.print_statistics(&mut out, generated);
        out.push('\n');

        let unmapped: Vec<_> = generated.unmapped().collect();
        if !unmapped.is_empty() {
            out.push_str("--- Unmapped accounts -------------------------------------------------------\n\n");
            for c in unmapped.iter().take(MAX_UNMAPPED_SHOWN) {
                out.push_str(&format!(
                    "  {:<width$} {:>amount$.2}\n",
                    c.entry.account_name,
                    c.entry.current,
                    width = LABEL_WIDTH,
                    amount = AMOUNT_WIDTH
                ));
            }
            if unmapped.len() > MAX_UNMAPPED_SHOWN {
                out.push_str(&format!(
                    "  ... and {} more\n",
                    unmapped.len() - MAX_UNMAPPED_SHOWN
                ));
            }
            out.push('\n');
        }

        for note in generated.notes.values() {
            let heading = if note.full_title.trim().is_empty() {
                format!("{}. {}", note.note, note.title.trim())
            } else {
                note.full_title.trim().to_string()
            };
            out.push_str(&format!(
                "--- {} {}\n\n",
                heading,
                "-".repeat(RULE_WIDTH.saturating_sub(heading.chars().count()))
            ));
            if let Some(figures) = generated.figures.get(&note.note) {
                out.push_str(&format!(
                    "  ({} accounts, in {})\n\n",
                    figures.account_count(),
                    generated.mapping.formatting.amount_unit
                ));
            }
            self.print_note(&mut out, note, &generated.mapping);
            out.push('\n');
        }

        if !generated.issues.is_empty() {
            out.push_str("--- Issues ------------------------------------------------------------------\n\n");
            for issue in &generated.issues {
                for (i, line) in textwrap::wrap(&issue.to_string(), WRAP_WIDTH - 4)
                    .iter()
                    .enumerate()
                {
                    out.push_str(if i == 0 { "  - " } else { "    " });
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }

        out
    }

    fn print_statistics(&self, out: &mut String, generated: &GeneratedNotes) {
        let summary = &generated.summary;
        let formatting = &generated.mapping.formatting;
        out.push_str(&format!("  Accounts:       {}\n", summary.total_records));
        out.push_str(&format!(
            "  Mapped:         {} ({:.1}%)\n",
            summary.mapped_records, summary.success_rate
        ));
        out.push_str(&format!("  Unmapped:       {}\n", summary.unmapped_records));
        out.push_str(&format!(
            "  Mapped amount:  {} {}\n",
            format_amount(
                summary.total_mapped_amount / formatting.conversion_factor,
                formatting
            ),
            formatting.amount_unit
        ));
        if !summary.by_source.is_empty() {
            out.push_str("\n  By rule:\n");
            for (source, count) in &summary.by_source {
                out.push_str(&format!("    {:<20} {}\n", source.to_string(), count));
            }
        }
        if !summary.by_note.is_empty() {
            out.push_str("\n  By note:\n");
            for (note, share) in &summary.by_note {
                out.push_str(&format!(
                    "    {:<4} {:<40} {:>4} accounts  {}\n",
                    note.as_str(),
                    generated.mapping.title(note).unwrap_or(""),
                    share.count,
                    format_amount(share.total_amount / formatting.conversion_factor, formatting)
                ));
            }
        }
    }

    fn print_note(&self, out: &mut String, note: &NoteTemplate, mapping: &ScheduleIiiMapping) {
        let formatting = &mapping.formatting;
        out.push_str(&format!(
            "  {:<label$} {:>amount$} {:>amount$}\n",
            "Particulars",
            mapping.periods.current,
            mapping.periods.previous,
            label = LABEL_WIDTH,
            amount = AMOUNT_WIDTH
        ));

        for block in &note.structure {
            if !block.category.trim().is_empty() {
                out.push_str(&format!("  {}\n", block.category.trim()));
            }
            for item in &block.subcategories {
                if DATE_LABEL.is_match(&item.label) {
                    continue;
                }
                self.print_row(
                    out,
                    &format!("  {}", item.label.trim()),
                    &format_cell(&item.value, formatting),
                    &item
                        .previous_value
                        .as_deref()
                        .map(|v| format_cell(v, formatting))
                        .unwrap_or_default(),
                );
            }
            if block.total.is_some() || block.previous_total.is_some() {
                self.print_row(
                    out,
                    &format!("Total {}", block.category.trim()),
                    &block
                        .total
                        .as_deref()
                        .map(|v| format_cell(v, formatting))
                        .unwrap_or_default(),
                    &block
                        .previous_total
                        .as_deref()
                        .map(|v| format_cell(v, formatting))
                        .unwrap_or_default(),
                );
            }
        }

        if !note.notes_and_disclosures.is_empty() {
            out.push('\n');
            for line in &note.notes_and_disclosures {
                for wrapped in textwrap::wrap(line, WRAP_WIDTH - 2) {
                    out.push_str("  ");
                    out.push_str(&wrapped);
                    out.push('\n');
                }
            }
        }
    }

    fn print_row(&self, out: &mut String, label: &str, current: &str, previous: &str) {
        // Long labels wrap; amounts go on the last line.
        let lines = textwrap::wrap(label, LABEL_WIDTH);
        let last = lines.len().saturating_sub(1);
        for (i, line) in lines.iter().enumerate() {
            if i < last {
                out.push_str(&format!("  {}\n", line));
            } else {
                out.push_str(&format!(
                    "  {:<label$} {:>amount$} {:>amount$}\n",
                    line,
                    current,
                    previous,
                    label = LABEL_WIDTH,
                    amount = AMOUNT_WIDTH
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::Map;

    use super::*;
    use crate::{
        domain::logic::test_support::test_mapping,
        entities::{
            CategoryBlock, LineItem, MappingSummary, NoteId, ValidationIssue,
        },
    };

    fn generated() -> GeneratedNotes {
        let note = NoteTemplate {
            note: NoteId::new("11"),
            title: "Inventories".into(),
            full_title: "11. Inventories".into(),
            structure: vec![
                CategoryBlock {
                    category: "In Lakhs".into(),
                    subcategories: vec![LineItem {
                        label: "March 31, 2024".into(),
                        value: "3.00".into(),
                        previous_value: None,
                    }],
                    total: None,
                    previous_total: None,
                },
                CategoryBlock {
                    category: "Valued at cost".into(),
                    subcategories: vec![LineItem {
                        label: "Raw materials".into(),
                        value: "1234.5".into(),
                        previous_value: Some("-".into()),
                    }],
                    total: Some("1234.5".into()),
                    previous_total: Some("0.00".into()),
                },
            ],
            metadata: Map::new(),
            notes_and_disclosures: vec!["Inventories are valued at the lower of cost and net realisable value.".into()],
            markdown_content: None,
        };
        GeneratedNotes {
            notes: BTreeMap::from([(note.note.clone(), note)]),
            figures: BTreeMap::new(),
            classified: vec![],
            summary: MappingSummary::default(),
            issues: vec![ValidationIssue::MissingTemplate {
                note: NoteId::new("12"),
            }],
            mapping: test_mapping(),
        }
    }

    #[test]
    fn prints_rows_totals_and_issues() {
        let text = NotesSummaryPrinter::new().print_summary(&generated());

        assert!(text.contains("11. Inventories"));
        assert!(text.contains("Raw materials"));
        assert!(text.contains("₹ 1,234.50"));
        assert!(text.contains("Total Valued at cost"));
        assert!(text.contains("lower of cost"));
        assert!(text.contains("Note 12 has figures but no template"));
        // Date header rows are not line items.
        assert!(!text.contains("March 31, 2024"));
    }

    #[test]
    fn heading_rules_have_a_fixed_width() {
        let mut generated = generated();
        let mut untitled = generated.notes[&NoteId::new("11")].clone();
        untitled.note = NoteId::new("12");
        untitled.title = "Cash and Bank Balances".into();
        untitled.full_title = String::new();
        generated.notes.insert(untitled.note.clone(), untitled);

        let text = NotesSummaryPrinter::new().print_summary(&generated);
        let headings: Vec<&str> = text
            .lines()
            .filter(|l| l.starts_with("--- 11.") || l.starts_with("--- 12."))
            .collect();
        assert_eq!(headings.len(), 2);
        assert!(headings[1].starts_with("--- 12. Cash and Bank Balances -"));
        for heading in headings {
            assert_eq!(heading.chars().count(), RULE_WIDTH + 5);
        }
    }

    #[test]
    fn recognises_date_labels() {
        for label in ["March 31, 2024", "31 March 2024", "31/03/2024", "2024-03-31"] {
            assert!(DATE_LABEL.is_match(label), "{}", label);
        }
        assert!(!DATE_LABEL.is_match("Raw materials"));
    }
}
