use tracing::debug;

use crate::entities::{
    ClassifiedEntry, LedgerEntry, MatchSource, NoteId, ScheduleIiiMapping,
};

pub(crate) struct AccountClassifier<'a> {
    mapping: &'a ScheduleIiiMapping,
}

impl<'a> AccountClassifier<'a> {
    pub(crate) fn new(mapping: &'a ScheduleIiiMapping) -> Self {
        Self { mapping }
    }

    pub(crate) fn classify(&self, entries: Vec<LedgerEntry>) -> Vec<ClassifiedEntry> {
        entries
            .into_iter()
            .map(|entry| self.classify_entry(entry))
            .collect()
    }

    pub(crate) fn classify_entry(&self, entry: LedgerEntry) -> ClassifiedEntry {
        let name = entry.account_name.trim().to_lowercase();
        let (note, matched_by, matched_rule) = match self.find_note(&name, entry.group.as_deref())
        {
            Some((note, source, rule)) => (Some(note), source, rule),
            None => (None, MatchSource::Unmapped, None),
        };
        let category = note.as_ref().and_then(|n| self.find_category(n, &name));
        debug!(
            account = %entry.account_name,
            note = ?note.as_ref().map(|n| n.as_str()),
            category = ?category,
            source = %matched_by,
            "classified account"
        );
        ClassifiedEntry {
            entry,
            note,
            category,
            matched_by,
            matched_rule,
        }
    }

    fn find_note(
        &self,
        name: &str,
        group: Option<&str>,
    ) -> Option<(NoteId, MatchSource, Option<String>)> {
        // Exact mappings are explicit overrides and ignore exclusions.
        if let Some(note) = self.mapping.exact.get(name) {
            return Some((note.clone(), MatchSource::ExactMapping, None));
        }

        if let Some(group) = group.map(|g| g.trim().to_lowercase()) {
            if let Some(note) = self.mapping.groups.get(&group) {
                if !self.mapping.is_excluded(note, name) {
                    return Some((note.clone(), MatchSource::Group, Some(group)));
                }
            }
        }

        if let Some(rule) = self.mapping.keywords.iter().find(|rule| {
            name.contains(rule.keyword.as_str()) && !self.mapping.is_excluded(&rule.note, name)
        }) {
            return Some((
                rule.note.clone(),
                MatchSource::Keyword,
                Some(rule.keyword.clone()),
            ));
        }

        if let Some(rule) = self.mapping.patterns.iter().find(|rule| {
            rule.pattern.is_match(name) && !self.mapping.is_excluded(&rule.note, name)
        }) {
            return Some((
                rule.note.clone(),
                MatchSource::Pattern,
                Some(rule.pattern.as_str().to_string()),
            ));
        }

        self.mapping
            .fallback_note
            .as_ref()
            .map(|note| (note.clone(), MatchSource::Fallback, None))
    }

    fn find_category(&self, note: &NoteId, name: &str) -> Option<String> {
        self.mapping
            .categories_for(note)
            .iter()
            .find(|c| c.matches(name))
            .map(|c| c.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::logic::test_support::{entry, test_mapping},
        entities::KeywordRule,
    };

    fn classify(name: &str) -> ClassifiedEntry {
        let mapping = test_mapping();
        AccountClassifier::new(&mapping).classify_entry(entry(name, 100.0))
    }

    #[test]
    fn exact_mapping_wins() {
        let c = classify("Deposits (Asset)");
        assert_eq!(c.note, Some(NoteId::new("10")));
        assert_eq!(c.matched_by, MatchSource::ExactMapping);
    }

    #[test]
    fn longest_keyword_wins() {
        // "short term advances" (14) is longer than "advances" (10).
        let c = classify("Short Term Advances to Staff");
        assert_eq!(c.note, Some(NoteId::new("14")));
        assert_eq!(c.matched_by, MatchSource::Keyword);
        assert_eq!(c.matched_rule.as_deref(), Some("short term advances"));
    }

    fn classify_with(mapping: &ScheduleIiiMapping, name: &str, group: Option<&str>) -> ClassifiedEntry {
        let mut e = entry(name, 100.0);
        e.group = group.map(str::to_string);
        AccountClassifier::new(mapping).classify_entry(e)
    }

    #[test]
    fn exclusion_vetoes_a_keyword() {
        // "advances" would map to 10, but note 10 excludes "short term".
        let c = classify("Advances Short Term Misc");
        assert_eq!(c.note, None);
        assert_eq!(c.matched_by, MatchSource::Unmapped);
    }

    #[test]
    fn exclusion_vetoes_a_group() {
        let mut mapping = test_mapping();
        mapping
            .groups
            .insert("loans & advances".into(), NoteId::new("10"));

        let c = classify_with(&mapping, "Short Term Bank Loan", Some("Loans & Advances"));
        assert_eq!(c.note, Some(NoteId::new("12")));
        assert_eq!(c.matched_by, MatchSource::Keyword);
        assert_eq!(c.matched_rule.as_deref(), Some("bank"));

        let c = classify_with(&mapping, "Staff Loan", Some("Loans & Advances"));
        assert_eq!(c.note, Some(NoteId::new("10")));
        assert_eq!(c.matched_by, MatchSource::Group);
    }

    #[test]
    fn exclusion_vetoes_a_pattern() {
        let mut mapping = test_mapping();
        mapping
            .exclusions
            .insert(NoteId::new("12"), vec!["register".into()]);

        let c = classify_with(&mapping, "Petty Register", None);
        assert_eq!(c.note, None);
        assert_eq!(c.matched_by, MatchSource::Unmapped);

        let c = classify_with(&mapping, "Petty Float", None);
        assert_eq!(c.note, Some(NoteId::new("12")));
        assert_eq!(c.matched_by, MatchSource::Pattern);
    }

    #[test]
    fn exact_mapping_ignores_exclusions() {
        let mut mapping = test_mapping();
        mapping
            .exact
            .insert("short term deposit".into(), NoteId::new("10"));

        let c = classify_with(&mapping, "Short Term Deposit", None);
        assert_eq!(c.note, Some(NoteId::new("10")));
        assert_eq!(c.matched_by, MatchSource::ExactMapping);
    }

    #[test]
    fn equal_length_keywords_break_ties_lexically() {
        let mut mapping = test_mapping();
        mapping.keywords.push(KeywordRule {
            keyword: "lender".into(),
            note: NoteId::new("16"),
        });
        mapping.keywords.push(KeywordRule {
            keyword: "debtor".into(),
            note: NoteId::new("13"),
        });
        KeywordRule::sort_by_specificity(&mut mapping.keywords);

        let c = classify_with(&mapping, "Lender cum Debtor A/c", None);
        assert_eq!(c.note, Some(NoteId::new("13")));
        assert_eq!(c.matched_by, MatchSource::Keyword);
        assert_eq!(c.matched_rule.as_deref(), Some("debtor"));
    }

    #[test]
    fn pattern_applies_after_keywords() {
        let c = classify("Petty Till");
        assert_eq!(c.note, Some(NoteId::new("12")));
        assert_eq!(c.matched_by, MatchSource::Pattern);
    }

    #[test]
    fn group_mapping_applies() {
        let mapping = test_mapping();
        let mut e = entry("ABC Enterprises", -500.0);
        e.group = Some("Sundry Creditors".into());
        let c = AccountClassifier::new(&mapping).classify_entry(e);
        assert_eq!(c.note, Some(NoteId::new("16")));
        assert_eq!(c.matched_by, MatchSource::Group);
    }

    #[test]
    fn unmatched_is_unmapped() {
        let c = classify("Suspense Account");
        assert_eq!(c.note, None);
        assert_eq!(c.matched_by, MatchSource::Unmapped);
        assert_eq!(c.category, None);
    }

    #[test]
    fn fallback_note_catches_the_rest() {
        let mut mapping = test_mapping();
        mapping.fallback_note = Some(NoteId::new("15"));
        let c = AccountClassifier::new(&mapping).classify_entry(entry("Suspense Account", 1.0));
        assert_eq!(c.note, Some(NoteId::new("15")));
        assert_eq!(c.matched_by, MatchSource::Fallback);
    }

    #[test]
    fn assigns_first_matching_category() {
        let c = classify("Raw Material - Steel");
        assert_eq!(c.note, Some(NoteId::new("11")));
        assert_eq!(c.category.as_deref(), Some("raw_materials"));

        let c = classify("Fixed Deposit with ICICI Bank");
        assert_eq!(c.category.as_deref(), Some("fixed_deposits"));
    }

    #[test]
    fn unknown_category_is_none() {
        let c = classify("Inventory in transit");
        assert_eq!(c.note, Some(NoteId::new("11")));
        assert_eq!(c.category, None);
    }
}
