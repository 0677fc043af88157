use super::note_id::NoteId;

#[derive(Debug, Clone, PartialEq, serde_derive::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    UnmappedAccount {
        account_name: String,
        amount: f64,
    },
    UncategorizedAccount {
        note: NoteId,
        account_name: String,
        amount: f64,
    },
    MissingTemplate {
        note: NoteId,
    },
    MissingPlaceholder {
        note: NoteId,
        token: String,
    },
    TotalMismatch {
        note: NoteId,
        category: String,
        period: String,
        stated: f64,
        computed: f64,
    },
}

impl ValidationIssue {
    /// Issues that make the generated notes wrong rather than incomplete.
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            ValidationIssue::MissingPlaceholder { .. } | ValidationIssue::TotalMismatch { .. }
        )
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationIssue::UnmappedAccount {
                account_name,
                amount,
            } => write!(
                f,
                "Account '{}' ({}) does not match any Schedule III note.",
                account_name, amount
            ),
            ValidationIssue::UncategorizedAccount {
                note,
                account_name,
                amount,
            } => write!(
                f,
                "Account '{}' ({}) belongs to note {} but to none of its categories.",
                account_name, amount, note
            ),
            ValidationIssue::MissingTemplate { note } => write!(
                f,
                "Note {} has figures but no template; it was left out.",
                note
            ),
            ValidationIssue::MissingPlaceholder { note, token } => write!(
                f,
                "Note {}: placeholder '{{{{{}}}}}' has no computed value.",
                note, token
            ),
            ValidationIssue::TotalMismatch {
                note,
                category,
                period,
                stated,
                computed,
            } => write!(
                f,
                "Note {}, '{}' ({}): stated total {} differs from the sum of its line items {}.",
                note, category, period, stated, computed
            ),
        }
    }
}
