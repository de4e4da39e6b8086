// Envelope model
//
// An envelope ("caixinha") tracks progress toward a target paid off in
// installments. `amount_paid` and `installments_paid` start at zero and only
// move through the pay-installment operation.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{money, validation, AppError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub total_target: Decimal,
    pub amount_paid: Decimal,
    pub installment_count_total: i32,
    pub installments_paid: i32,
    pub start_date: NaiveDate,
    pub created_at: NaiveDateTime,
}

fn validate_installment_total(count: i32) -> Result<i32> {
    if count < 1 {
        return Err(AppError::validation(format!(
            "installment_count_total must be at least 1, got {}",
            count
        )));
    }
    Ok(count)
}

/// Request body for POST /api/envelopes
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEnvelopeRequest {
    pub name: String,
    pub total_target: Decimal,
    pub installment_count_total: i32,
    pub start_date: NaiveDate,
}

impl CreateEnvelopeRequest {
    pub fn into_envelope(self, user_id: &str) -> Result<Envelope> {
        Ok(Envelope {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: validation::required_text("name", &self.name)?,
            total_target: money::non_negative_amount("total_target", self.total_target)?,
            amount_paid: Decimal::ZERO,
            installment_count_total: validate_installment_total(self.installment_count_total)?,
            installments_paid: 0,
            start_date: self.start_date,
            created_at: chrono::Utc::now().naive_utc(),
        })
    }
}

/// Request body for PUT /api/envelopes/{id}
///
/// Paid counters are not part of the patch; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEnvelopeRequest {
    pub name: Option<String>,
    pub total_target: Option<Decimal>,
    pub installment_count_total: Option<i32>,
    pub start_date: Option<NaiveDate>,
}

impl UpdateEnvelopeRequest {
    pub fn apply(self, envelope: &mut Envelope) -> Result<()> {
        if let Some(name) = self.name {
            envelope.name = validation::required_text("name", &name)?;
        }
        if let Some(target) = self.total_target {
            envelope.total_target = money::non_negative_amount("total_target", target)?;
        }
        if let Some(count) = self.installment_count_total {
            envelope.installment_count_total = validate_installment_total(count)?;
        }
        if let Some(start_date) = self.start_date {
            envelope.start_date = start_date;
        }
        Ok(())
    }
}

/// Request body for PUT /api/envelopes/{id}/pay
#[derive(Debug, Clone, Deserialize)]
pub struct PayInstallmentRequest {
    pub amount: Decimal,
}

/// Response for PUT /api/envelopes/{id}/pay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub id: String,
    pub amount_paid: Decimal,
    pub installments_paid: i32,
}

impl From<Envelope> for PaymentReceipt {
    fn from(envelope: Envelope) -> Self {
        Self {
            id: envelope.id,
            amount_paid: envelope.amount_paid,
            installments_paid: envelope.installments_paid,
        }
    }
}
