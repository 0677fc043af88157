use super::{ledger_entry::LedgerEntry, note_id::NoteId};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde_derive::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    ExactMapping,
    Group,
    Keyword,
    Pattern,
    Fallback,
    Unmapped,
}

impl std::fmt::Display for MatchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchSource::ExactMapping => write!(f, "exact mapping"),
            MatchSource::Group => write!(f, "group mapping"),
            MatchSource::Keyword => write!(f, "keyword rule"),
            MatchSource::Pattern => write!(f, "pattern rule"),
            MatchSource::Fallback => write!(f, "fallback note"),
            MatchSource::Unmapped => write!(f, "unmapped"),
        }
    }
}

#[derive(Debug, Clone, serde_derive::Serialize)]
pub struct ClassifiedEntry {
    #[serde(flatten)]
    pub entry: LedgerEntry,
    pub note: Option<NoteId>,
    /// None when the account matched a note but none of its categories.
    pub category: Option<String>,
    pub matched_by: MatchSource,
    /// The keyword, pattern or group that produced the match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_rule: Option<String>,
}

impl ClassifiedEntry {
    pub fn is_mapped(&self) -> bool {
        self.note.is_some()
    }
}
