use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::MySqlPool;

use crate::core::traits::{GuardedDelete, Repository};
use crate::core::{AppError, Result};
use crate::modules::accounts::models::{Account, AccountKind};
use crate::modules::transactions::repositories::delete_unless_linked;

#[async_trait]
pub trait AccountRepository: Repository<Account> {
    /// Delete the account unless a transaction links to it; the check and
    /// the delete are atomic
    async fn delete_unreferenced(&self, id: &str, user_id: &str) -> Result<GuardedDelete>;
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, user_id, name, kind, credit_limit, current_balance, color, icon, active, created_at
    FROM accounts
"#;

#[derive(Clone)]
pub struct MySqlAccountRepository {
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Account> for MySqlAccountRepository {
    async fn create(&self, entity: &Account) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                id, user_id, name, kind, credit_limit, current_balance,
                color, icon, active, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entity.id)
        .bind(&entity.user_id)
        .bind(&entity.name)
        .bind(entity.kind.as_str())
        .bind(entity.credit_limit)
        .bind(entity.current_balance)
        .bind(&entity.color)
        .bind(&entity.icon)
        .bind(entity.active)
        .bind(entity.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str, user_id: &str) -> Result<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "{} WHERE id = ? AND user_id = ?",
            SELECT_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Account::try_from).transpose()
    }

    async fn update(&self, entity: &Account) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET name = ?, kind = ?, credit_limit = ?, current_balance = ?,
                color = ?, icon = ?, active = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&entity.name)
        .bind(entity.kind.as_str())
        .bind(entity.credit_limit)
        .bind(entity.current_balance)
        .bind(&entity.color)
        .bind(&entity.icon)
        .bind(entity.active)
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
        let result = sqlx::query("DELETE FROM accounts WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Account>> {
        let rows = sqlx::query_as::<_, AccountRow>(&format!(
            "{} WHERE user_id = ? ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Account::try_from).collect()
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn delete_unreferenced(&self, id: &str, user_id: &str) -> Result<GuardedDelete> {
        delete_unless_linked(&self.pool, "accounts", "account_id", id, user_id).await
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: String,
    user_id: String,
    name: String,
    kind: String,
    credit_limit: Decimal,
    current_balance: Decimal,
    color: String,
    icon: String,
    active: bool,
    created_at: NaiveDateTime,
}

impl TryFrom<AccountRow> for Account {
    type Error = AppError;

    fn try_from(row: AccountRow) -> Result<Self> {
        let kind = row
            .kind
            .parse::<AccountKind>()
            .map_err(|_| AppError::Internal(format!("Invalid stored account kind: {}", row.kind)))?;

        Ok(Account {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            kind,
            credit_limit: row.credit_limit,
            current_balance: row.current_balance,
            color: row.color,
            icon: row.icon,
            active: row.active,
            created_at: row.created_at,
        })
    }
}
