use std::sync::Arc;

use tracing::info;

use crate::core::traits::GuardedDelete;
use crate::core::{AppError, Result};
use crate::modules::categories::models::{
    CreateCategoryRequest, CustomCategory, UpdateCategoryRequest,
};
use crate::modules::categories::repositories::CategoryRepository;

/// User-defined categories: per-user unique names, delete guarded by usage
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    pub async fn create(
        &self,
        user_id: &str,
        request: CreateCategoryRequest,
    ) -> Result<CustomCategory> {
        let category = request.into_category(user_id)?;
        self.ensure_name_free(user_id, &category.name, None).await?;

        self.categories.create(&category).await?;

        info!(
            user_id = user_id,
            category_id = category.id.as_str(),
            "Category created"
        );
        Ok(category)
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<CustomCategory>> {
        self.categories.list_by_user(user_id).await
    }

    pub async fn get(&self, id: &str, user_id: &str) -> Result<CustomCategory> {
        self.categories
            .find_by_id(id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Category '{}' not found", id)))
    }

    pub async fn update(
        &self,
        id: &str,
        user_id: &str,
        request: UpdateCategoryRequest,
    ) -> Result<CustomCategory> {
        let mut category = self.get(id, user_id).await?;
        request.apply(&mut category)?;
        self.ensure_name_free(user_id, &category.name, Some(id)).await?;

        if !self.categories.update(&category).await? {
            return Err(AppError::not_found(format!("Category '{}' not found", id)));
        }
        Ok(category)
    }

    /// Delete a category no transaction references
    pub async fn delete(&self, id: &str, user_id: &str) -> Result<()> {
        match self.categories.delete_unreferenced(id, user_id).await? {
            GuardedDelete::Deleted => {}
            GuardedDelete::NotFound => {
                return Err(AppError::not_found(format!("Category '{}' not found", id)));
            }
            GuardedDelete::Referenced(references) => {
                return Err(AppError::conflict(format!(
                    "Category is used by {} transaction(s) and cannot be deleted",
                    references
                )));
            }
        }

        info!(user_id = user_id, category_id = id, "Category deleted");
        Ok(())
    }

    async fn ensure_name_free(&self, user_id: &str, name: &str, except_id: Option<&str>) -> Result<()> {
        match self.categories.find_by_name(user_id, name).await? {
            Some(existing) if Some(existing.id.as_str()) != except_id => Err(AppError::conflict(
                format!("A category named '{}' already exists", existing.name),
            )),
            _ => Ok(()),
        }
    }
}
