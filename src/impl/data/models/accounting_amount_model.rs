use std::{str::FromStr, sync::LazyLock};

use fractic_server_error::ServerError;
use regex::Regex;

use crate::errors::InvalidAccountingAmount;

static RUPEE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\brs\.?\s*").expect("hardcoded regex should be valid"));

#[derive(Debug)]
pub(crate) struct AccountingAmountModel(pub f64);
impl FromStr for AccountingAmountModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = RUPEE_PREFIX
            .replace_all(&s.replace(",", "").replace("₹", "").replace("$", ""), "")
            .trim()
            .to_string();
        if raw.is_empty() || raw == "-" {
            return Ok(AccountingAmountModel(0.0));
        }

        // Trial balances exported from Indian accounting packages mark the
        // side with a Dr / Cr suffix (occasionally a prefix).
        let lower = raw.to_lowercase();
        let (is_credit, unmarked) = if let Some(rest) = lower.strip_suffix("cr") {
            (true, rest.trim_end_matches('.').trim().to_string())
        } else if let Some(rest) = lower.strip_suffix("dr") {
            (false, rest.trim_end_matches('.').trim().to_string())
        } else if let Some(rest) = lower.strip_prefix("cr") {
            (true, rest.trim_start_matches('.').trim().to_string())
        } else if let Some(rest) = lower.strip_prefix("dr") {
            (false, rest.trim_start_matches('.').trim().to_string())
        } else {
            (false, lower)
        };

        let is_negative = unmarked.starts_with("(") && unmarked.ends_with(")");
        let numeric_part = unmarked.trim_matches(|c| c == '(' || c == ')').trim();
        let amount = numeric_part
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| InvalidAccountingAmount::new(s.trim()))?;
        let amount = if is_negative { -amount } else { amount };
        Ok(AccountingAmountModel(if is_credit {
            -amount.abs()
        } else {
            amount
        }))
    }
}

impl From<AccountingAmountModel> for f64 {
    fn from(model: AccountingAmountModel) -> f64 {
        model.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> f64 {
        AccountingAmountModel::from_str(s).unwrap().into()
    }

    #[test]
    fn parses_plain_and_grouped_numbers() {
        assert_eq!(parse("1234.5"), 1234.5);
        assert_eq!(parse("12,34,567.00"), 1234567.0);
        assert_eq!(parse(" ₹ 1,000 "), 1000.0);
    }

    #[test]
    fn parentheses_are_negative() {
        assert_eq!(parse("(2,500)"), -2500.0);
    }

    #[test]
    fn credit_marker_is_negative() {
        assert_eq!(parse("5,000 Cr"), -5000.0);
        assert_eq!(parse("5000cr"), -5000.0);
        assert_eq!(parse("Cr. 75"), -75.0);
        assert_eq!(parse("5,000 Dr"), 5000.0);
    }

    #[test]
    fn blank_and_dash_are_zero() {
        assert_eq!(parse(""), 0.0);
        assert_eq!(parse("  -  "), 0.0);
    }

    #[test]
    fn rejects_text() {
        assert!(AccountingAmountModel::from_str("twelve").is_err());
        assert!(AccountingAmountModel::from_str("12..5").is_err());
    }

    #[test]
    fn rejects_non_finite_values() {
        for s in ["NaN", "nan", "inf", "-infinity", "Infinity Cr"] {
            assert!(AccountingAmountModel::from_str(s).is_err(), "{}", s);
        }
    }

    #[test]
    fn strips_rupee_prefix_in_any_case() {
        assert_eq!(parse("Rs. 100"), 100.0);
        assert_eq!(parse("rs. 1,250"), 1250.0);
        assert_eq!(parse("RS 75 Cr"), -75.0);
    }
}
