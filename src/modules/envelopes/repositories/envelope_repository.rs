use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sqlx::MySqlPool;

use crate::core::traits::Repository;
use crate::core::{money, Result};
use crate::modules::envelopes::models::Envelope;

#[async_trait]
pub trait EnvelopeRepository: Repository<Envelope> {
    /// Atomically add `amount` to `amount_paid` and one to
    /// `installments_paid`, returning the updated envelope.
    ///
    /// `None` when the envelope does not exist for the user. Concurrent
    /// calls never lose an increment. A payment that would push
    /// `amount_paid` beyond the storable range is a validation error and
    /// leaves the envelope unchanged.
    async fn add_payment(&self, id: &str, user_id: &str, amount: Decimal)
        -> Result<Option<Envelope>>;
}

const SELECT_COLUMNS: &str = r#"
    SELECT
        id, user_id, name, total_target, amount_paid, installment_count_total,
        installments_paid, start_date, created_at
    FROM envelopes
"#;

#[derive(Clone)]
pub struct MySqlEnvelopeRepository {
    pool: MySqlPool,
}

impl MySqlEnvelopeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Envelope> for MySqlEnvelopeRepository {
    async fn create(&self, entity: &Envelope) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO envelopes (
                id, user_id, name, total_target, amount_paid,
                installment_count_total, installments_paid, start_date, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entity.id)
        .bind(&entity.user_id)
        .bind(&entity.name)
        .bind(entity.total_target)
        .bind(entity.amount_paid)
        .bind(entity.installment_count_total)
        .bind(entity.installments_paid)
        .bind(entity.start_date)
        .bind(entity.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str, user_id: &str) -> Result<Option<Envelope>> {
        let row = sqlx::query_as::<_, EnvelopeRow>(&format!(
            "{} WHERE id = ? AND user_id = ?",
            SELECT_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Envelope::from))
    }

    /// Writes the editable fields only; paid counters are left untouched
    async fn update(&self, entity: &Envelope) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE envelopes
            SET name = ?, total_target = ?, installment_count_total = ?, start_date = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&entity.name)
        .bind(entity.total_target)
        .bind(entity.installment_count_total)
        .bind(entity.start_date)
        .bind(&entity.id)
        .bind(&entity.user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(self.find_by_id(&entity.id, &entity.user_id).await?.is_some());
        }
        Ok(true)
    }

    async fn delete(&self, id: &str, user_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM envelopes WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Envelope>> {
        let rows = sqlx::query_as::<_, EnvelopeRow>(&format!(
            "{} WHERE user_id = ? ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Envelope::from).collect())
    }
}

#[async_trait]
impl EnvelopeRepository for MySqlEnvelopeRepository {
    async fn add_payment(
        &self,
        id: &str,
        user_id: &str,
        amount: Decimal,
    ) -> Result<Option<Envelope>> {
        let mut tx = self.pool.begin().await?;

        // Row lock held until commit
        let current: Option<(Decimal,)> = sqlx::query_as(
            "SELECT amount_paid FROM envelopes WHERE id = ? AND user_id = ? FOR UPDATE",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((amount_paid,)) = current else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Err(e) = money::within_storage_range("amount_paid", amount_paid + amount) {
            tx.rollback().await?;
            return Err(e);
        }

        sqlx::query(
            r#"
            UPDATE envelopes
            SET amount_paid = amount_paid + ?, installments_paid = installments_paid + 1
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(amount)
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query_as::<_, EnvelopeRow>(&format!(
            "{} WHERE id = ? AND user_id = ?",
            SELECT_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.map(Envelope::from))
    }
}

#[derive(sqlx::FromRow)]
struct EnvelopeRow {
    id: String,
    user_id: String,
    name: String,
    total_target: Decimal,
    amount_paid: Decimal,
    installment_count_total: i32,
    installments_paid: i32,
    start_date: NaiveDate,
    created_at: NaiveDateTime,
}

impl From<EnvelopeRow> for Envelope {
    fn from(row: EnvelopeRow) -> Self {
        Envelope {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            total_target: row.total_target,
            amount_paid: row.amount_paid,
            installment_count_total: row.installment_count_total,
            installments_paid: row.installments_paid,
            start_date: row.start_date,
            created_at: row.created_at,
        }
    }
}
