use std::str::FromStr as _;

use fractic_server_error::ServerError;

use super::accounting_amount_model::AccountingAmountModel;

/// Amounts in JSON trial balances come either as numbers or as formatted
/// strings ("1,23,456.00 Cr").
#[derive(Debug, serde_derive::Deserialize)]
#[serde(untagged)]
pub(crate) enum AmountModel {
    Number(f64),
    Text(String),
}

impl AmountModel {
    pub(crate) fn value(&self) -> Result<f64, ServerError> {
        match self {
            AmountModel::Number(n) => Ok(*n),
            AmountModel::Text(s) => Ok(AccountingAmountModel::from_str(s)?.into()),
        }
    }
}

/// Trial-balance exports carry sub-headings, serial numbers and separator
/// rows alongside real accounts. Only names with at least three characters
/// and at least one letter count as accounts.
pub(crate) fn is_account_name(name: &str) -> bool {
    let name = name.trim();
    name.chars().count() > 2 && name.chars().any(|c| c.is_alphabetic())
}

#[derive(Debug, serde_derive::Deserialize)]
pub(crate) struct TrialBalanceRecordModel {
    #[serde(default, alias = "account")]
    pub(crate) account_name: String,
    #[serde(default)]
    pub(crate) amount: Option<AmountModel>,
    #[serde(default, alias = "amount_previous")]
    pub(crate) previous_amount: Option<AmountModel>,
    #[serde(default)]
    pub(crate) group: Option<String>,
    #[serde(default)]
    pub(crate) source_file: Option<String>,
}

#[derive(Debug, serde_derive::Deserialize)]
#[serde(untagged)]
pub(crate) enum TrialBalanceDocumentModel {
    Records(Vec<TrialBalanceRecordModel>),
    Accounts {
        accounts: Vec<TrialBalanceRecordModel>,
    },
    TrialBalance {
        trial_balance: Vec<TrialBalanceRecordModel>,
    },
}

impl From<TrialBalanceDocumentModel> for Vec<TrialBalanceRecordModel> {
    fn from(model: TrialBalanceDocumentModel) -> Self {
        match model {
            TrialBalanceDocumentModel::Records(records)
            | TrialBalanceDocumentModel::Accounts { accounts: records }
            | TrialBalanceDocumentModel::TrialBalance {
                trial_balance: records,
            } => records,
        }
    }
}
