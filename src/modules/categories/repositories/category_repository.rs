use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::MySqlPool;

use crate::core::traits::{GuardedDelete, Repository};
use crate::core::{AppError, Result};
use crate::modules::categories::models::{CategoryKind, CustomCategory};
use crate::modules::transactions::repositories::delete_unless_linked;

#[async_trait]
pub trait CategoryRepository: Repository<CustomCategory> {
    /// Name lookup within one user's categories; matches names with the
    /// same `CustomCategory::name_key`
    async fn find_by_name(&self, user_id: &str, name: &str) -> Result<Option<CustomCategory>>;

    /// Delete the category unless a transaction links to it; the check and
    /// the delete are atomic
    async fn delete_unreferenced(&self, id: &str, user_id: &str) -> Result<GuardedDelete>;
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, user_id, name, icon, color, kind, created_at
    FROM custom_categories
"#;

#[derive(Clone)]
pub struct MySqlCategoryRepository {
    pool: MySqlPool,
}

impl MySqlCategoryRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn duplicate_name(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            AppError::conflict("A category with this name already exists")
        }
        other => AppError::Database(other),
    }
}

#[async_trait]
impl Repository<CustomCategory> for MySqlCategoryRepository {
    async fn create(&self, entity: &CustomCategory) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO custom_categories (id, user_id, name, icon, color, kind, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entity.id)
        .bind(&entity.user_id)
        .bind(&entity.name)
        .bind(&entity.icon)
        .bind(&entity.color)
        .bind(entity.kind.as_str())
        .bind(entity.created_at)
        .execute(&self.pool)
        .await
        .map_err(duplicate_name)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str, user_id: &str) -> Result<Option<CustomCategory>> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "{} WHERE id = ? AND user_id = ?",
            SELECT_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(CustomCategory::try_from).transpose()
    }

    async fn update(&self, entity: &CustomCategory) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE custom_categories
            SET name = ?, icon = ?, color = ?, kind = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&entity.name)
        .bind(&entity.icon)
        .bind(&entity.color)
        .bind(entity.kind.as_str())
        .bind(&entity.id)
        .bind(&entity.user_id)
        .execute(&self.pool)
        .await
        .map_err(duplicate_name)?;

        if result.rows_affected() == 0 {
            return Ok(self.find_by_id(&entity.id, &entity.user_id).await?.is_some());
        }
        Ok(true)
    }

    async fn delete(&self, id: &str, user_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM custom_categories WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<CustomCategory>> {
        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            "{} WHERE user_id = ? ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CustomCategory::try_from).collect()
    }
}

#[async_trait]
impl CategoryRepository for MySqlCategoryRepository {
    async fn find_by_name(&self, user_id: &str, name: &str) -> Result<Option<CustomCategory>> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "{} WHERE user_id = ? AND name = ?",
            SELECT_COLUMNS
        ))
        .bind(user_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(CustomCategory::try_from).transpose()
    }

    async fn delete_unreferenced(&self, id: &str, user_id: &str) -> Result<GuardedDelete> {
        delete_unless_linked(&self.pool, "custom_categories", "custom_category_id", id, user_id)
            .await
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: String,
    user_id: String,
    name: String,
    icon: String,
    color: String,
    kind: String,
    created_at: NaiveDateTime,
}

impl TryFrom<CategoryRow> for CustomCategory {
    type Error = AppError;

    fn try_from(row: CategoryRow) -> Result<Self> {
        let kind = row
            .kind
            .parse::<CategoryKind>()
            .map_err(|_| AppError::Internal(format!("Invalid stored category kind: {}", row.kind)))?;

        Ok(CustomCategory {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            icon: row.icon,
            color: row.color,
            kind,
            created_at: row.created_at,
        })
    }
}
