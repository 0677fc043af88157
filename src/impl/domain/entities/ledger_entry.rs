#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Current,
    Previous,
}

/// One trial-balance line. Debit balances are positive, credit balances
/// negative.
#[derive(Debug, Clone, PartialEq, serde_derive::Serialize)]
pub struct LedgerEntry {
    pub account_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub current: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl LedgerEntry {
    pub fn amount(&self, period: Period) -> f64 {
        match period {
            Period::Current => self.current,
            Period::Previous => self.previous.unwrap_or(0.0),
        }
    }
}

/// Labels for the two reporting periods, used as placeholder suffixes
/// (`raw_materials_2024`) and as trial-balance column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Periods {
    pub current: String,
    pub previous: String,
}

impl Periods {
    pub fn label(&self, period: Period) -> &str {
        match period {
            Period::Current => &self.current,
            Period::Previous => &self.previous,
        }
    }
}
