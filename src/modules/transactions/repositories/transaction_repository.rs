// MySQL persistence for transactions
//
// Implements:
// - Single insert and transactional batch insert (installment plans)
// - Owner-scoped lookup, update and delete
// - Listing by user, newest date first
// - Unpaid-by-account query feeding the balance calculator
// - Locked reference checks guarding account and category deletion

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sqlx::{MySql, MySqlPool, Transaction as DbTransaction};

use crate::core::traits::{GuardedDelete, Repository};
use crate::core::{AppError, Result};
use crate::modules::transactions::models::{Transaction, TransactionKind};

/// Transaction persistence capabilities beyond the shared CRUD set
#[async_trait]
pub trait TransactionRepository: Repository<Transaction> {
    /// Insert every transaction or none
    async fn create_batch(&self, transactions: &[Transaction]) -> Result<()>;

    /// Unpaid transactions linked to an account
    async fn find_unpaid_by_account(&self, account_id: &str, user_id: &str)
        -> Result<Vec<Transaction>>;

    /// All installments sharing a group tag, ordered by index
    async fn find_by_group(&self, group_id: &str, user_id: &str) -> Result<Vec<Transaction>>;
}

/// Delete a row of `parent_table` unless a transaction links to it through
/// `link_column`.
///
/// The parent row and the matching index range of `transactions` stay locked
/// until commit, so a link inserted concurrently waits for the outcome.
pub(crate) async fn delete_unless_linked(
    pool: &MySqlPool,
    parent_table: &'static str,
    link_column: &'static str,
    id: &str,
    user_id: &str,
) -> Result<GuardedDelete> {
    let mut tx = pool.begin().await?;

    let parent = sqlx::query_scalar::<_, String>(&format!(
        "SELECT id FROM {} WHERE id = ? AND user_id = ? FOR UPDATE",
        parent_table
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?;

    if parent.is_none() {
        tx.rollback().await?;
        return Ok(GuardedDelete::NotFound);
    }

    let references = sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COUNT(*) FROM transactions WHERE {} = ? AND user_id = ? FOR UPDATE",
        link_column
    ))
    .bind(id)
    .bind(user_id)
    .fetch_one(&mut *tx)
    .await?;

    if references > 0 {
        tx.rollback().await?;
        return Ok(GuardedDelete::Referenced(references));
    }

    sqlx::query(&format!(
        "DELETE FROM {} WHERE id = ? AND user_id = ?",
        parent_table
    ))
    .bind(id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(GuardedDelete::Deleted)
}

const SELECT_COLUMNS: &str = r#"
    SELECT
        id, user_id, value, category, kind, date, description, is_recurring,
        is_paid, installment_count, installment_index, account_id,
        custom_category_id, installment_group_id, created_at
    FROM transactions
"#;

/// Repository for transaction database operations
#[derive(Clone)]
pub struct MySqlTransactionRepository {
    pool: MySqlPool,
}

impl MySqlTransactionRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Share-lock the linked account and category so a concurrent delete
    /// cannot remove them before commit
    async fn lock_links(
        &self,
        tx: &mut DbTransaction<'_, MySql>,
        transaction: &Transaction,
    ) -> Result<()> {
        let links = [
            ("accounts", "Account", transaction.account_id.as_deref()),
            ("custom_categories", "Category", transaction.custom_category_id.as_deref()),
        ];

        for (table, label, id) in links {
            let Some(id) = id else { continue };

            let found = sqlx::query_scalar::<_, String>(&format!(
                "SELECT id FROM {} WHERE id = ? AND user_id = ? FOR SHARE",
                table
            ))
            .bind(id)
            .bind(&transaction.user_id)
            .fetch_optional(&mut **tx)
            .await?;

            if found.is_none() {
                return Err(AppError::not_found(format!("{} '{}' not found", label, id)));
            }
        }

        Ok(())
    }

    async fn insert_with_tx(
        &self,
        tx: &mut DbTransaction<'_, MySql>,
        transaction: &Transaction,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, user_id, value, category, kind, date, description,
                is_recurring, is_paid, installment_count, installment_index,
                account_id, custom_category_id, installment_group_id, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&transaction.id)
        .bind(&transaction.user_id)
        .bind(transaction.value)
        .bind(&transaction.category)
        .bind(transaction.kind.as_str())
        .bind(transaction.date)
        .bind(&transaction.description)
        .bind(transaction.is_recurring)
        .bind(transaction.is_paid)
        .bind(transaction.installment_count)
        .bind(transaction.installment_index)
        .bind(&transaction.account_id)
        .bind(&transaction.custom_category_id)
        .bind(&transaction.installment_group_id)
        .bind(transaction.created_at)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl Repository<Transaction> for MySqlTransactionRepository {
    async fn create(&self, entity: &Transaction) -> Result<()> {
        self.create_batch(std::slice::from_ref(entity)).await
    }

    async fn find_by_id(&self, id: &str, user_id: &str) -> Result<Option<Transaction>> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            "{} WHERE id = ? AND user_id = ?",
            SELECT_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Transaction::try_from).transpose()
    }

    async fn update(&self, entity: &Transaction) -> Result<bool> {
        let mut tx = self.pool.begin().await?;
        self.lock_links(&mut tx, entity).await?;

        let rows_affected = sqlx::query(
            r#"
            UPDATE transactions
            SET
                value = ?, category = ?, kind = ?, date = ?, description = ?,
                is_recurring = ?, is_paid = ?, installment_count = ?,
                installment_index = ?, account_id = ?, custom_category_id = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(entity.value)
        .bind(&entity.category)
        .bind(entity.kind.as_str())
        .bind(entity.date)
        .bind(&entity.description)
        .bind(entity.is_recurring)
        .bind(entity.is_paid)
        .bind(entity.installment_count)
        .bind(entity.installment_index)
        .bind(&entity.account_id)
        .bind(&entity.custom_category_id)
        .bind(&entity.id)
        .bind(&entity.user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        // MySQL reports 0 affected rows when nothing changed, so confirm existence
        let exists = rows_affected > 0
            || sqlx::query_scalar::<_, String>(
                "SELECT id FROM transactions WHERE id = ? AND user_id = ?",
            )
            .bind(&entity.id)
            .bind(&entity.user_id)
            .fetch_optional(&mut *tx)
            .await?
            .is_some();

        tx.commit().await?;
        Ok(exists)
    }

    async fn delete(&self, id: &str, user_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            "{} WHERE user_id = ? ORDER BY date DESC, created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Transaction::try_from).collect()
    }
}

#[async_trait]
impl TransactionRepository for MySqlTransactionRepository {
    async fn create_batch(&self, transactions: &[Transaction]) -> Result<()> {
        if transactions.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        for transaction in transactions {
            self.lock_links(&mut tx, transaction).await?;
            self.insert_with_tx(&mut tx, transaction).await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn find_unpaid_by_account(
        &self,
        account_id: &str,
        user_id: &str,
    ) -> Result<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            "{} WHERE account_id = ? AND user_id = ? AND is_paid = FALSE ORDER BY date ASC",
            SELECT_COLUMNS
        ))
        .bind(account_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Transaction::try_from).collect()
    }

    async fn find_by_group(&self, group_id: &str, user_id: &str) -> Result<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            "{} WHERE installment_group_id = ? AND user_id = ? ORDER BY installment_index ASC",
            SELECT_COLUMNS
        ))
        .bind(group_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Transaction::try_from).collect()
    }

}

/// Database row representation for the transactions table
#[derive(sqlx::FromRow)]
struct TransactionRow {
    id: String,
    user_id: String,
    value: Decimal,
    category: String,
    kind: String,
    date: NaiveDate,
    description: String,
    is_recurring: bool,
    is_paid: bool,
    installment_count: i32,
    installment_index: i32,
    account_id: Option<String>,
    custom_category_id: Option<String>,
    installment_group_id: Option<String>,
    created_at: NaiveDateTime,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = AppError;

    fn try_from(row: TransactionRow) -> Result<Self> {
        let kind = row
            .kind
            .parse::<TransactionKind>()
            .map_err(|_| AppError::Internal(format!("Invalid stored transaction kind: {}", row.kind)))?;

        Ok(Transaction {
            id: row.id,
            user_id: row.user_id,
            value: row.value,
            category: row.category,
            kind,
            date: row.date,
            description: row.description,
            is_recurring: row.is_recurring,
            is_paid: row.is_paid,
            installment_count: row.installment_count,
            installment_index: row.installment_index,
            account_id: row.account_id,
            custom_category_id: row.custom_category_id,
            installment_group_id: row.installment_group_id,
            created_at: row.created_at,
        })
    }
}
