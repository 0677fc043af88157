use std::collections::BTreeMap;

use super::{
    classification::ClassifiedEntry, ledger_entry::LedgerEntry, mapping::ScheduleIiiMapping,
    mapping_summary::MappingSummary, note_figures::NoteFigures, note_id::NoteId,
    note_template::NoteTemplate, validation_issue::ValidationIssue,
};

// Before processing.
// ---

pub struct NoteInputs {
    pub entries: Vec<LedgerEntry>,
    pub mapping: ScheduleIiiMapping,
    pub templates: Vec<NoteTemplate>,
}

// After processing.
// ---

#[derive(Debug, Clone)]
pub struct GeneratedNotes {
    /// Filled notes, in statement order.
    pub notes: BTreeMap<NoteId, NoteTemplate>,
    pub figures: BTreeMap<NoteId, NoteFigures>,
    pub classified: Vec<ClassifiedEntry>,
    pub summary: MappingSummary,
    pub issues: Vec<ValidationIssue>,
    pub mapping: ScheduleIiiMapping,
}

impl GeneratedNotes {
    pub fn has_blocking_issues(&self) -> bool {
        self.issues.iter().any(|i| i.is_blocking())
    }

    pub fn unmapped(&self) -> impl Iterator<Item = &ClassifiedEntry> {
        self.classified.iter().filter(|c| !c.is_mapped())
    }
}

#[derive(Debug, Clone, serde_derive::Serialize)]
pub struct ClassifiedTrialBalance {
    pub classified: Vec<ClassifiedEntry>,
    pub summary: MappingSummary,
}
