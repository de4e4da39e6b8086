use std::sync::Arc;

use tracing::info;

use crate::core::{money, AppError, Result};
use crate::modules::envelopes::models::{
    CreateEnvelopeRequest, Envelope, PayInstallmentRequest, PaymentReceipt, UpdateEnvelopeRequest,
};
use crate::modules::envelopes::repositories::EnvelopeRepository;

pub struct EnvelopeService {
    envelopes: Arc<dyn EnvelopeRepository>,
}

impl EnvelopeService {
    pub fn new(envelopes: Arc<dyn EnvelopeRepository>) -> Self {
        Self { envelopes }
    }

    pub async fn create(&self, user_id: &str, request: CreateEnvelopeRequest) -> Result<Envelope> {
        let envelope = request.into_envelope(user_id)?;
        self.envelopes.create(&envelope).await?;

        info!(
            user_id = user_id,
            envelope_id = envelope.id.as_str(),
            "Envelope created"
        );
        Ok(envelope)
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<Envelope>> {
        self.envelopes.list_by_user(user_id).await
    }

    pub async fn update(
        &self,
        id: &str,
        user_id: &str,
        request: UpdateEnvelopeRequest,
    ) -> Result<Envelope> {
        let mut envelope = self
            .envelopes
            .find_by_id(id, user_id)
            .await?
            .ok_or_else(|| envelope_not_found(id))?;

        request.apply(&mut envelope)?;

        if !self.envelopes.update(&envelope).await? {
            return Err(envelope_not_found(id));
        }
        Ok(envelope)
    }

    /// Record one installment payment.
    ///
    /// Payments beyond `total_target` or `installment_count_total` are
    /// accepted; the counters simply keep growing.
    pub async fn pay(
        &self,
        id: &str,
        user_id: &str,
        request: PayInstallmentRequest,
    ) -> Result<PaymentReceipt> {
        let amount = money::positive_amount("amount", request.amount)?;

        let envelope = self
            .envelopes
            .add_payment(id, user_id, amount)
            .await?
            .ok_or_else(|| envelope_not_found(id))?;

        info!(
            user_id = user_id,
            envelope_id = id,
            amount = %amount,
            installments_paid = envelope.installments_paid,
            "Envelope installment paid"
        );
        Ok(PaymentReceipt::from(envelope))
    }

    pub async fn delete(&self, id: &str, user_id: &str) -> Result<()> {
        if !self.envelopes.delete(id, user_id).await? {
            return Err(envelope_not_found(id));
        }
        Ok(())
    }
}

fn envelope_not_found(id: &str) -> AppError {
    AppError::not_found(format!("Envelope '{}' not found", id))
}
