use super::{ledger_entry::Period, note_id::NoteId};

pub const UNCATEGORIZED: &str = "uncategorized";

#[derive(Debug, Clone, Copy, Default, PartialEq, serde_derive::Serialize)]
pub struct PeriodAmounts {
    pub current: f64,
    pub previous: f64,
}

impl PeriodAmounts {
    pub fn get(&self, period: Period) -> f64 {
        match period {
            Period::Current => self.current,
            Period::Previous => self.previous,
        }
    }

    pub(crate) fn add(&mut self, period: Period, amount: f64) {
        match period {
            Period::Current => self.current += amount,
            Period::Previous => self.previous += amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde_derive::Serialize)]
pub struct CategoryFigure {
    pub name: String,
    /// Signed sum of the ledger amounts, before unit conversion.
    pub raw: PeriodAmounts,
    /// In the presentation unit, rounded.
    pub presented: PeriodAmounts,
    pub accounts: Vec<String>,
}

impl CategoryFigure {
    /// "raw_materials" -> "Raw Materials".
    pub fn label(&self) -> String {
        self.name
            .split(|c| c == '_' || c == ' ')
            .filter(|w| !w.is_empty())
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Aggregated figures of one note. The total is the sum of the presented
/// category figures, so it always agrees with the line items.
#[derive(Debug, Clone, PartialEq, serde_derive::Serialize)]
pub struct NoteFigures {
    pub note: NoteId,
    pub categories: Vec<CategoryFigure>,
    pub total: PeriodAmounts,
}

impl NoteFigures {
    pub fn category(&self, name: &str) -> Option<&CategoryFigure> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn account_count(&self) -> usize {
        self.categories.iter().map(|c| c.accounts.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_title_cased() {
        let figure = CategoryFigure {
            name: "raw_materials".into(),
            raw: PeriodAmounts::default(),
            presented: PeriodAmounts::default(),
            accounts: vec![],
        };
        assert_eq!(figure.label(), "Raw Materials");
    }
}
