//! Budget dialog form state.
//!
//! The dialog collects everything as editable text. This module is the
//! only place that text is interpreted; empty, malformed or negative
//! amounts become zero instead of errors.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use crate::types::{CreditTier, FinancialProfile};

/// Raw field values of the budget dialog, as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetForm {
    pub income: String,
    pub expenses: String,
    pub cash: String,
    /// Selected option label, e.g. `"Good (700-749)"`.
    pub credit_score: String,
}

impl Default for BudgetForm {
    fn default() -> Self {
        Self {
            income: String::new(),
            expenses: String::new(),
            cash: String::new(),
            credit_score: CreditTier::default().label().to_string(),
        }
    }
}

impl BudgetForm {
    /// Normalize the form into a profile the estimator can consume.
    pub fn to_profile(&self) -> FinancialProfile {
        FinancialProfile::new(
            parse_amount(&self.income),
            parse_amount(&self.expenses),
            parse_amount(&self.cash),
            CreditTier::from_label(&self.credit_score),
        )
    }
}

/// Parse a currency amount such as `"5000"`, `"$5,000.50"` or `"1e4"`.
///
/// Returns zero for anything that is empty, unparsable, or negative.
pub fn parse_amount(text: &str) -> Decimal {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed).trim_start();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
    let parsed = Decimal::from_str(&cleaned).or_else(|_| Decimal::from_scientific(&cleaned));

    match parsed {
        Ok(value) if value >= Decimal::ZERO => value,
        Ok(value) => {
            debug!(input = text, %value, "Negative amount, treating as zero");
            Decimal::ZERO
        }
        Err(e) => {
            debug!(input = text, error = %e, "Unparsable amount, treating as zero");
            Decimal::ZERO
        }
    }
}
