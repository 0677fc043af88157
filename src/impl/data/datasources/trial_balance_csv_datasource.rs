use std::{fs, str::FromStr as _};

use csv::StringRecord;
use fractic_server_error::ServerError;
use tracing::debug;

use crate::{
    data::models::{
        accounting_amount_model::AccountingAmountModel,
        trial_balance_record_model::is_account_name,
    },
    entities::{LedgerEntry, Periods},
    errors::{InvalidCsv, InvalidCsvContent, ReadError},
};

const NAME_COLUMNS: [&str; 5] = ["account_name", "account", "particulars", "ledger", "name"];
const AMOUNT_COLUMNS: [&str; 4] = ["closing", "closing_balance", "amount", "balance"];
const PREVIOUS_COLUMNS: [&str; 3] = ["previous", "previous_amount", "previous_year"];

pub(crate) trait TrialBalanceCsvDatasource {
    fn from_string(&self, s: &str, periods: &Periods) -> Result<Vec<LedgerEntry>, ServerError>;

    fn from_file<P>(&self, path: P, periods: &Periods) -> Result<Vec<LedgerEntry>, ServerError>
    where
        P: AsRef<std::path::Path>;
}

pub(crate) struct TrialBalanceCsvDatasourceImpl;

impl TrialBalanceCsvDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

enum CurrentAmount {
    Column(usize),
    DebitCredit {
        debit: Option<usize>,
        credit: Option<usize>,
    },
}

struct Columns {
    name: usize,
    group: Option<usize>,
    current: CurrentAmount,
    previous: Option<usize>,
}

impl Columns {
    fn detect(headers: &StringRecord, periods: &Periods) -> Result<Self, ServerError> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.trim().to_lowercase().replace(' ', "_"))
            .collect();
        let find = |candidates: &[&str]| {
            candidates
                .iter()
                .find_map(|c| normalized.iter().position(|h| h == c))
        };
        let period_column = |label: &str| {
            let label = label.trim().to_lowercase();
            normalized.iter().position(|h| *h == label)
        };

        let current = match period_column(&periods.current).or_else(|| find(&AMOUNT_COLUMNS)) {
            Some(i) => CurrentAmount::Column(i),
            None => {
                let debit = find(&["debit"]);
                let credit = find(&["credit"]);
                if debit.is_none() && credit.is_none() {
                    return Err(InvalidCsvContent::new(&format!(
                        "no amount column; expected '{}', one of {:?}, or debit / credit",
                        periods.current, AMOUNT_COLUMNS
                    )));
                }
                CurrentAmount::DebitCredit { debit, credit }
            }
        };

        Ok(Columns {
            name: find(&NAME_COLUMNS).unwrap_or(0),
            group: find(&["group"]),
            current,
            previous: period_column(&periods.previous).or_else(|| find(&PREVIOUS_COLUMNS)),
        })
    }
}

fn amount_at(record: &StringRecord, index: usize) -> Result<f64, ServerError> {
    Ok(AccountingAmountModel::from_str(record.get(index).unwrap_or(""))?.into())
}

impl TrialBalanceCsvDatasource for TrialBalanceCsvDatasourceImpl {
    fn from_string(&self, s: &str, periods: &Periods) -> Result<Vec<LedgerEntry>, ServerError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(s.as_bytes());
        let headers = reader
            .headers()
            .map_err(|e| InvalidCsv::with_debug(&e))?
            .clone();
        let columns = Columns::detect(&headers, periods)?;

        let mut entries = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let r = record.map_err(|e| InvalidCsv::with_debug(&e))?;

            // Extract from CSV record.
            let account_name = r.get(columns.name).unwrap_or("").trim();
            if !is_account_name(account_name) {
                debug!(row = row + 2, name = account_name, "skipping non-account row");
                continue;
            }
            let group = columns
                .group
                .and_then(|i| r.get(i))
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(str::to_string);

            // Parse.
            let current = match columns.current {
                CurrentAmount::Column(i) => amount_at(&r, i)?,
                CurrentAmount::DebitCredit { debit, credit } => {
                    debit.map_or(Ok(0.0), |i| amount_at(&r, i))?
                        - credit.map_or(Ok(0.0), |i| amount_at(&r, i))?
                }
            };
            let previous = columns.previous.map(|i| amount_at(&r, i)).transpose()?;

            // Build.
            entries.push(LedgerEntry {
                account_name: account_name.to_string(),
                group,
                current,
                previous,
                source: None,
            });
        }
        Ok(entries)
    }

    fn from_file<P>(&self, path: P, periods: &Periods) -> Result<Vec<LedgerEntry>, ServerError>
    where
        P: AsRef<std::path::Path>,
    {
        let source = path
            .as_ref()
            .file_name()
            .map(|f| f.to_string_lossy().into_owned());
        let content = fs::read_to_string(path).map_err(|e| ReadError::with_debug(&e))?;
        Ok(self
            .from_string(&content, periods)?
            .into_iter()
            .map(|entry| LedgerEntry {
                source: source.clone(),
                ..entry
            })
            .collect())
    }
}
