use std::collections::BTreeMap;

use super::{classification::MatchSource, note_id::NoteId};

#[derive(Debug, Clone, Default, PartialEq, serde_derive::Serialize)]
pub struct NoteShare {
    pub count: usize,
    /// Sum of absolute raw amounts (current period).
    pub total_amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, serde_derive::Serialize)]
pub struct MappingSummary {
    pub total_records: usize,
    pub mapped_records: usize,
    pub unmapped_records: usize,
    /// Percentage, 0 when there are no records.
    pub success_rate: f64,
    pub total_mapped_amount: f64,
    pub by_source: BTreeMap<MatchSource, usize>,
    pub by_note: BTreeMap<NoteId, NoteShare>,
}
