use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::{TransactionDraft, TransactionKind};

/// How a multi-installment total is turned into per-installment values.
///
/// Deployments disagree on whether installments are slices of one purchase or
/// repeated charges, so the choice is always explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitPolicy {
    /// `round(total / count, 2)` per installment; the rounding remainder is
    /// dropped, so the sum may differ from the total by up to half a cent
    /// per installment.
    #[default]
    Divide,
    /// Every installment carries the full total (separate future charges).
    Repeat,
    /// `total / count` truncated to cents, with the last installment
    /// absorbing the remainder so the sum equals the total exactly.
    DivideExact,
}

impl SplitPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Divide => "divide",
            Self::Repeat => "repeat",
            Self::DivideExact => "divide_exact",
        }
    }
}

impl std::fmt::Display for SplitPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SplitPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "divide" => Ok(Self::Divide),
            "repeat" => Ok(Self::Repeat),
            "divide_exact" => Ok(Self::DivideExact),
            other => Err(format!(
                "unknown split policy '{}' (expected divide, repeat or divide_exact)",
                other
            )),
        }
    }
}

/// Request body for POST /api/transactions/installments
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInstallmentsRequest {
    pub total_value: Decimal,
    pub installment_count: i32,
    pub start_date: NaiveDate,
    pub category: String,
    pub kind: TransactionKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_recurring: bool,
    pub account_id: Option<String>,
    pub custom_category_id: Option<String>,
    /// Overrides the deployment's default policy for this request
    pub split_policy: Option<SplitPolicy>,
}

/// Output of the installment planner
#[derive(Debug, Clone, PartialEq)]
pub struct InstallmentPlan {
    /// Shared tag for every draft; `None` for single-installment plans
    pub group_id: Option<String>,
    pub policy: SplitPolicy,
    /// Ordered by `installment_index` (and therefore by date)
    pub drafts: Vec<TransactionDraft>,
}

impl InstallmentPlan {
    pub fn total_value(&self) -> Decimal {
        self.drafts.iter().map(|d| d.value).sum()
    }
}

/// Response for POST /api/transactions/installments
#[derive(Debug, Serialize, Deserialize)]
pub struct InstallmentBatchResponse {
    pub ids: Vec<String>,
    pub group_id: Option<String>,
    pub count: usize,
    pub split_policy: SplitPolicy,
    pub message: String,
}
