// Balance projection tests
//
// Worked examples per account kind plus properties that hold for any mix of
// unpaid expenses and incomes.

use chrono::{NaiveDate, Utc};
use fintrack::accounts::{Account, AccountBalanceCalculator, AccountKind, Exposure};
use fintrack::transactions::{Transaction, TransactionKind};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn account(kind: AccountKind, credit_limit: Decimal, current_balance: Decimal) -> Account {
    Account {
        id: "acc-1".to_string(),
        user_id: "user-1".to_string(),
        name: "Card".to_string(),
        kind,
        credit_limit,
        current_balance,
        color: "#3B82F6".to_string(),
        icon: "CreditCard".to_string(),
        active: true,
        created_at: Utc::now().naive_utc(),
    }
}

fn unpaid(value: Decimal, kind: TransactionKind) -> Transaction {
    Transaction {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: "user-1".to_string(),
        value,
        category: "Misc".to_string(),
        kind,
        date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        description: String::new(),
        is_recurring: false,
        is_paid: false,
        installment_count: 1,
        installment_index: 1,
        account_id: Some("acc-1".to_string()),
        custom_category_id: None,
        installment_group_id: None,
        created_at: Utc::now().naive_utc(),
    }
}

#[test]
fn test_checking_account_available_balance() {
    let report = AccountBalanceCalculator::balance(
        &account(AccountKind::Checking, Decimal::ZERO, dec!(100)),
        &[unpaid(dec!(30), TransactionKind::Expense)],
    );

    assert_eq!(report.total_unpaid, dec!(30));
    assert_eq!(
        report.exposure,
        Exposure::Funds {
            available_balance: dec!(70)
        }
    );
}

#[test]
fn test_credit_card_utilization() {
    let report = AccountBalanceCalculator::balance(
        &account(AccountKind::CreditCard, dec!(1000), Decimal::ZERO),
        &[
            unpaid(dec!(200), TransactionKind::Expense),
            unpaid(dec!(50), TransactionKind::Expense),
        ],
    );

    assert_eq!(report.total_unpaid, dec!(250));
    assert_eq!(
        report.exposure,
        Exposure::Credit {
            credit_limit: dec!(1000),
            available: dec!(750),
            utilization_percent: Some(dec!(25.0)),
        }
    );
}

#[test]
fn test_zero_limit_has_no_utilization() {
    let report = AccountBalanceCalculator::balance(
        &account(AccountKind::CreditCard, Decimal::ZERO, Decimal::ZERO),
        &[unpaid(dec!(10), TransactionKind::Expense)],
    );

    assert_eq!(
        report.exposure,
        Exposure::Credit {
            credit_limit: Decimal::ZERO,
            available: dec!(-10),
            utilization_percent: None,
        }
    );
}

#[test]
fn test_overdrawn_savings_goes_negative() {
    let report = AccountBalanceCalculator::balance(
        &account(AccountKind::Savings, Decimal::ZERO, dec!(-20)),
        &[unpaid(dec!(5), TransactionKind::Expense)],
    );

    assert_eq!(
        report.exposure,
        Exposure::Funds {
            available_balance: dec!(-25)
        }
    );
}

#[test]
fn test_report_json_shape() {
    let credit = AccountBalanceCalculator::balance(
        &account(AccountKind::CreditCard, Decimal::ZERO, Decimal::ZERO),
        &[],
    );
    let json = serde_json::to_value(&credit).unwrap();
    assert_eq!(json["kind"], "credit_card");
    assert!(json.get("credit_limit").is_some());
    assert!(json.get("available").is_some());
    assert!(json["utilization_percent"].is_null());
    assert!(json.get("available_balance").is_none());

    let cash = AccountBalanceCalculator::balance(
        &account(AccountKind::Cash, Decimal::ZERO, dec!(10)),
        &[],
    );
    let json = serde_json::to_value(&cash).unwrap();
    assert!(json.get("available_balance").is_some());
    assert!(json.get("utilization_percent").is_none());
}

fn entry_strategy() -> impl Strategy<Value = (i64, bool)> {
    (0i64..10_000_000i64, any::<bool>())
}

proptest! {
    /// `available = limit - total_unpaid` for any set of unpaid entries
    #[test]
    fn prop_credit_available_is_limit_minus_unpaid(
        limit_cents in 0i64..100_000_000i64,
        entries in prop::collection::vec(entry_strategy(), 0..20),
    ) {
        let limit = Decimal::new(limit_cents, 2);
        let transactions: Vec<Transaction> = entries
            .iter()
            .map(|(cents, is_income)| {
                let kind = if *is_income { TransactionKind::Income } else { TransactionKind::Expense };
                unpaid(Decimal::new(*cents, 2), kind)
            })
            .collect();

        let expected: Decimal = transactions.iter().map(Transaction::signed_value).sum();
        let report = AccountBalanceCalculator::balance(
            &account(AccountKind::CreditCard, limit, Decimal::ZERO),
            &transactions,
        );

        prop_assert_eq!(report.total_unpaid, expected);
        match report.exposure {
            Exposure::Credit { available, utilization_percent, .. } => {
                prop_assert_eq!(available, limit - expected);
                prop_assert_eq!(utilization_percent.is_none(), limit.is_zero());
            }
            Exposure::Funds { .. } => prop_assert!(false, "credit card reported funds"),
        }
    }

    /// Non-credit kinds subtract the unpaid total from the stored balance
    #[test]
    fn prop_funds_available_is_balance_minus_unpaid(
        balance_cents in -10_000_000i64..10_000_000i64,
        entries in prop::collection::vec(entry_strategy(), 0..20),
    ) {
        let balance = Decimal::new(balance_cents, 2);
        let transactions: Vec<Transaction> = entries
            .iter()
            .map(|(cents, is_income)| {
                let kind = if *is_income { TransactionKind::Income } else { TransactionKind::Expense };
                unpaid(Decimal::new(*cents, 2), kind)
            })
            .collect();

        let report = AccountBalanceCalculator::balance(
            &account(AccountKind::DebitCard, Decimal::ZERO, balance),
            &transactions,
        );

        prop_assert_eq!(
            report.exposure,
            Exposure::Funds { available_balance: balance - report.total_unpaid }
        );
    }
}
