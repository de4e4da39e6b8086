use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;
use uuid::Uuid;

use crate::core::{money, validation, AppError, Result};
use crate::modules::transactions::models::transaction::non_blank;
use crate::modules::transactions::models::{
    CreateInstallmentsRequest, InstallmentPlan, SplitPolicy, TransactionDraft, MAX_INSTALLMENTS,
};

/// Expands one logical purchase into dated monthly installment drafts
pub struct InstallmentPlanner;

impl InstallmentPlanner {
    /// Plan the installments for `request` on behalf of `user_id`.
    ///
    /// Installment `i` (1-based) is dated `start_date + (i - 1)` calendar
    /// months, always counted from the start date so a day-of-month clamped in
    /// a short month is restored afterwards (Jan 31, Feb 28, Mar 31).
    ///
    /// Every draft is unpaid. Multi-installment plans share one freshly
    /// generated group id; a single-installment plan is a plain transaction
    /// carrying the full value and the description unchanged.
    ///
    /// Either every draft is produced or an error is returned.
    pub fn plan(
        request: &CreateInstallmentsRequest,
        user_id: &str,
        policy: SplitPolicy,
    ) -> Result<InstallmentPlan> {
        let count = request.installment_count;
        if count < 1 || count > MAX_INSTALLMENTS {
            return Err(AppError::validation(format!(
                "installment_count must be between 1 and {}, got {}",
                MAX_INSTALLMENTS, count
            )));
        }

        let total = money::non_negative_amount("total_value", request.total_value)?;
        let category = validation::required_text("category", &request.category)?;
        let description = request.description.trim();
        let account_id = non_blank(request.account_id.clone());
        let custom_category_id = non_blank(request.custom_category_id.clone());

        if count == 1 {
            return Ok(InstallmentPlan {
                group_id: None,
                policy,
                drafts: vec![TransactionDraft {
                    user_id: user_id.to_string(),
                    value: total,
                    category,
                    kind: request.kind,
                    date: request.start_date,
                    description: description.to_string(),
                    is_recurring: request.is_recurring,
                    is_paid: false,
                    installment_count: 1,
                    installment_index: 1,
                    account_id,
                    custom_category_id,
                    installment_group_id: None,
                }],
            });
        }

        let values = Self::split_values(total, count as u32, policy);
        let group_id = Uuid::new_v4().to_string();

        debug!(
            user_id = user_id,
            count = count,
            total = %total,
            policy = %policy,
            group_id = group_id.as_str(),
            "Planning installments"
        );

        let mut drafts = Vec::with_capacity(count as usize);
        for (offset, value) in values.into_iter().enumerate() {
            let index = offset as i32 + 1;

            drafts.push(TransactionDraft {
                user_id: user_id.to_string(),
                value,
                category: category.clone(),
                kind: request.kind,
                date: Self::installment_date(request.start_date, offset as u32)?,
                description: Self::installment_description(description, index, count),
                is_recurring: request.is_recurring,
                is_paid: false,
                installment_count: count,
                installment_index: index,
                account_id: account_id.clone(),
                custom_category_id: custom_category_id.clone(),
                installment_group_id: Some(group_id.clone()),
            });
        }

        Ok(InstallmentPlan {
            group_id: Some(group_id),
            policy,
            drafts,
        })
    }

    /// Per-installment values for `count > 1` under `policy`
    fn split_values(total: Decimal, count: u32, policy: SplitPolicy) -> Vec<Decimal> {
        let n = count as usize;

        match policy {
            SplitPolicy::Repeat => vec![total; n],
            SplitPolicy::Divide => {
                let share = money::round_money(total / Decimal::from(count));
                vec![share; n]
            }
            SplitPolicy::DivideExact => {
                // Truncate so the last installment absorbs a non-negative remainder
                let share = (total / Decimal::from(count))
                    .round_dp_with_strategy(money::MONEY_SCALE, RoundingStrategy::ToZero);
                let mut values = vec![share; n];
                values[n - 1] = total - share * Decimal::from(count - 1);
                values
            }
        }
    }

    fn installment_date(start: NaiveDate, months_ahead: u32) -> Result<NaiveDate> {
        start
            .checked_add_months(Months::new(months_ahead))
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Installment date out of range: {} + {} months",
                    start, months_ahead
                ))
            })
    }

    fn installment_description(description: &str, index: i32, count: i32) -> String {
        if description.is_empty() {
            format!("Parcela {}/{}", index, count)
        } else {
            format!("{} ({}/{})", description, index, count)
        }
    }
}
