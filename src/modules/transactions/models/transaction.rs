// Transaction model
//
// A transaction is one dated income or expense entry owned by a user. Entries
// produced by splitting a purchase into installments share an
// `installment_group_id` and carry their position in the plan.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{money, validation, AppError, Result};

/// Upper bound on installment plans; keeps a single request from inserting
/// an unbounded number of rows.
pub const MAX_INSTALLMENTS: i32 = 120;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            _ => Err(AppError::validation(format!(
                "Invalid transaction kind '{}' (expected expense or income)",
                s
            ))),
        }
    }
}

/// A persisted transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub value: Decimal,
    pub category: String,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub description: String,
    pub is_recurring: bool,
    pub is_paid: bool,
    pub installment_count: i32,
    /// 1-based position inside the installment plan
    pub installment_index: i32,
    pub account_id: Option<String>,
    pub custom_category_id: Option<String>,
    pub installment_group_id: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Transaction fields before an id and creation time are assigned
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub user_id: String,
    pub value: Decimal,
    pub category: String,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub description: String,
    pub is_recurring: bool,
    pub is_paid: bool,
    pub installment_count: i32,
    pub installment_index: i32,
    pub account_id: Option<String>,
    pub custom_category_id: Option<String>,
    pub installment_group_id: Option<String>,
}

impl Transaction {
    /// Materialise a draft with a fresh id and creation timestamp
    pub fn from_draft(draft: TransactionDraft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: draft.user_id,
            value: draft.value,
            category: draft.category,
            kind: draft.kind,
            date: draft.date,
            description: draft.description,
            is_recurring: draft.is_recurring,
            is_paid: draft.is_paid,
            installment_count: draft.installment_count,
            installment_index: draft.installment_index,
            account_id: draft.account_id,
            custom_category_id: draft.custom_category_id,
            installment_group_id: draft.installment_group_id,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Signed contribution to an account's outstanding amount:
    /// expenses add, incomes subtract.
    pub fn signed_value(&self) -> Decimal {
        match self.kind {
            TransactionKind::Expense => self.value,
            TransactionKind::Income => -self.value,
        }
    }

    /// Check value, category and installment invariants
    pub fn validate(&self) -> Result<()> {
        validate_installment_position(self.installment_index, self.installment_count)?;

        if self.value < Decimal::ZERO {
            return Err(AppError::validation("Transaction value cannot be negative"));
        }

        if self.category.trim().is_empty() {
            return Err(AppError::validation("category is required"));
        }

        Ok(())
    }
}

fn validate_installment_position(index: i32, count: i32) -> Result<()> {
    if count < 1 || count > MAX_INSTALLMENTS {
        return Err(AppError::validation(format!(
            "installment_count must be between 1 and {}, got {}",
            MAX_INSTALLMENTS, count
        )));
    }

    if index < 1 || index > count {
        return Err(AppError::validation(format!(
            "installment_index must be between 1 and installment_count ({}), got {}",
            count, index
        )));
    }

    Ok(())
}

/// Request body for POST /api/transactions
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTransactionRequest {
    pub value: Decimal,
    pub category: String,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default = "default_one")]
    pub installment_count: i32,
    #[serde(default = "default_one")]
    pub installment_index: i32,
    pub account_id: Option<String>,
    pub custom_category_id: Option<String>,
    pub installment_group_id: Option<String>,
}

fn default_one() -> i32 {
    1
}

impl CreateTransactionRequest {
    /// Validate and normalise into a draft owned by `user_id`
    pub fn into_draft(self, user_id: &str) -> Result<TransactionDraft> {
        validate_installment_position(self.installment_index, self.installment_count)?;

        Ok(TransactionDraft {
            user_id: user_id.to_string(),
            value: money::non_negative_amount("value", self.value)?,
            category: validation::required_text("category", &self.category)?,
            kind: self.kind,
            date: self.date,
            description: validation::bounded_text(
                "description",
                &self.description,
                validation::MAX_DESCRIPTION_LENGTH,
            )?,
            is_recurring: self.is_recurring,
            is_paid: self.is_paid,
            installment_count: self.installment_count,
            installment_index: self.installment_index,
            account_id: non_blank(self.account_id),
            custom_category_id: non_blank(self.custom_category_id),
            installment_group_id: non_blank(self.installment_group_id),
        })
    }
}

/// Request body for PUT /api/transactions/{id}
///
/// Every field is optional; absent fields keep their stored value. An empty
/// string for `account_id` or `custom_category_id` clears the link.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTransactionRequest {
    pub value: Option<Decimal>,
    pub category: Option<String>,
    pub kind: Option<TransactionKind>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub is_recurring: Option<bool>,
    pub is_paid: Option<bool>,
    pub installment_count: Option<i32>,
    pub installment_index: Option<i32>,
    pub account_id: Option<String>,
    pub custom_category_id: Option<String>,
}

impl UpdateTransactionRequest {
    /// Apply the patch onto a stored transaction and re-check invariants
    pub fn apply(self, transaction: &mut Transaction) -> Result<()> {
        if let Some(value) = self.value {
            transaction.value = money::non_negative_amount("value", value)?;
        }
        if let Some(category) = self.category {
            transaction.category = validation::required_text("category", &category)?;
        }
        if let Some(kind) = self.kind {
            transaction.kind = kind;
        }
        if let Some(date) = self.date {
            transaction.date = date;
        }
        if let Some(description) = self.description {
            transaction.description = validation::bounded_text(
                "description",
                &description,
                validation::MAX_DESCRIPTION_LENGTH,
            )?;
        }
        if let Some(is_recurring) = self.is_recurring {
            transaction.is_recurring = is_recurring;
        }
        if let Some(is_paid) = self.is_paid {
            transaction.is_paid = is_paid;
        }
        if let Some(count) = self.installment_count {
            transaction.installment_count = count;
        }
        if let Some(index) = self.installment_index {
            transaction.installment_index = index;
        }
        if let Some(account_id) = self.account_id {
            transaction.account_id = non_blank(Some(account_id));
        }
        if let Some(category_id) = self.custom_category_id {
            transaction.custom_category_id = non_blank(Some(category_id));
        }

        transaction.validate()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
            && self.category.is_none()
            && self.kind.is_none()
            && self.date.is_none()
            && self.description.is_none()
            && self.is_recurring.is_none()
            && self.is_paid.is_none()
            && self.installment_count.is_none()
            && self.installment_index.is_none()
            && self.account_id.is_none()
            && self.custom_category_id.is_none()
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
