use std::fs;

use fractic_server_error::ServerError;
use tracing::debug;

use crate::{
    data::models::trial_balance_record_model::{
        is_account_name, TrialBalanceDocumentModel, TrialBalanceRecordModel,
    },
    entities::LedgerEntry,
    errors::{InvalidJson, ReadError},
};

pub(crate) trait TrialBalanceJsonDatasource {
    fn from_string(&self, s: &str) -> Result<Vec<LedgerEntry>, ServerError>;

    fn from_file<P>(&self, path: P) -> Result<Vec<LedgerEntry>, ServerError>
    where
        P: AsRef<std::path::Path>;
}

pub(crate) struct TrialBalanceJsonDatasourceImpl;

impl TrialBalanceJsonDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl TrialBalanceJsonDatasource for TrialBalanceJsonDatasourceImpl {
    fn from_string(&self, s: &str) -> Result<Vec<LedgerEntry>, ServerError> {
        let document: TrialBalanceDocumentModel =
            serde_json::from_str(s).map_err(|e| InvalidJson::with_debug("trial balance", &e))?;
        Vec::<TrialBalanceRecordModel>::from(document)
            .into_iter()
            .filter(|record| {
                let keep = is_account_name(&record.account_name);
                if !keep {
                    debug!(name = %record.account_name, "skipping non-account record");
                }
                keep
            })
            .map(|record| -> Result<LedgerEntry, ServerError> {
                Ok(LedgerEntry {
                    account_name: record.account_name.trim().to_string(),
                    group: record.group.filter(|g| !g.trim().is_empty()),
                    current: match &record.amount {
                        Some(amount) => amount.value()?,
                        None => 0.0,
                    },
                    previous: record
                        .previous_amount
                        .as_ref()
                        .map(|a| a.value())
                        .transpose()?,
                    source: record.source_file,
                })
            })
            .collect()
    }

    fn from_file<P>(&self, path: P) -> Result<Vec<LedgerEntry>, ServerError>
    where
        P: AsRef<std::path::Path>,
    {
        self.from_string(&fs::read_to_string(path).map_err(|e| ReadError::with_debug(&e))?)
    }
}
