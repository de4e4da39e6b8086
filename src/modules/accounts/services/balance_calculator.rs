use rust_decimal::Decimal;

use crate::core::money;
use crate::modules::accounts::models::{Account, BalanceReport, Exposure};
use crate::modules::transactions::models::Transaction;

/// Derives an account's real-time exposure from its unpaid linked transactions
pub struct AccountBalanceCalculator;

impl AccountBalanceCalculator {
    /// Project the balance report for `account`.
    ///
    /// The caller supplies the unpaid transactions linked to the account; they
    /// are summed as given, expenses positive and incomes negative.
    ///
    /// Credit cards report limit, available credit and utilization; every
    /// other kind reports `current_balance - total_unpaid`. A zero credit
    /// limit yields no utilization figure instead of dividing by zero.
    pub fn balance(account: &Account, unpaid_transactions: &[Transaction]) -> BalanceReport {
        let total_unpaid: Decimal = unpaid_transactions
            .iter()
            .map(Transaction::signed_value)
            .sum();

        let exposure = if account.kind.is_credit() {
            let limit = account.credit_limit;
            let utilization_percent = if limit.is_zero() {
                None
            } else {
                Some(money::round_percent(total_unpaid / limit * Decimal::ONE_HUNDRED))
            };

            Exposure::Credit {
                credit_limit: limit,
                available: limit - total_unpaid,
                utilization_percent,
            }
        } else {
            Exposure::Funds {
                available_balance: account.current_balance - total_unpaid,
            }
        };

        BalanceReport {
            account_id: account.id.clone(),
            name: account.name.clone(),
            kind: account.kind,
            current_balance: account.current_balance,
            total_unpaid,
            exposure,
        }
    }
}
