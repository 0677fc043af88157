use std::cmp::Ordering;

/// Statutory note identifier as it appears in the financial statements
/// ("6", "12", "12A").
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub String);

impl NoteId {
    pub fn new(s: impl Into<String>) -> Self {
        NoteId(s.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric_prefix(&self) -> Option<u64> {
        let digits: String = self.0.chars().take_while(|c| c.is_ascii_digit()).collect();
        digits.parse().ok()
    }
}

impl std::fmt::Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Notes sort in statement order: 9 before 10, 12 before 12A.
impl Ord for NoteId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric_prefix(), other.numeric_prefix()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for NoteId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_numerically() {
        let mut ids = vec![
            NoteId::new("12A"),
            NoteId::new("10"),
            NoteId::new("9"),
            NoteId::new("12"),
            NoteId::new("misc"),
        ];
        ids.sort();
        let sorted: Vec<&str> = ids.iter().map(|n| n.as_str()).collect();
        assert_eq!(sorted, vec!["9", "10", "12", "12A", "misc"]);
    }
}
