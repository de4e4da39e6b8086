use rust_decimal::Decimal;
use serde::Serialize;

use super::account::AccountKind;

/// Read-time projection of an account's exposure from its unpaid transactions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceReport {
    pub account_id: String,
    pub name: String,
    pub kind: AccountKind,
    pub current_balance: Decimal,
    /// Expenses minus incomes across unpaid linked transactions
    pub total_unpaid: Decimal,
    #[serde(flatten)]
    pub exposure: Exposure,
}

/// Kind-specific part of a balance report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Exposure {
    Credit {
        credit_limit: Decimal,
        available: Decimal,
        /// `None` when the limit is zero
        utilization_percent: Option<Decimal>,
    },
    Funds {
        available_balance: Decimal,
    },
}
