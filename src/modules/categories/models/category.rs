use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{validation, AppError, Result};

pub const DEFAULT_CATEGORY_ICON: &str = "Tag";
pub const DEFAULT_CATEGORY_COLOR: &str = "#6B7280";

/// Budget class of a user-defined category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Fixed,
    Variable,
    Income,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Variable => "variable",
            Self::Income => "income",
        }
    }
}

impl std::str::FromStr for CategoryKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fixed" => Ok(Self::Fixed),
            "variable" => Ok(Self::Variable),
            "income" => Ok(Self::Income),
            _ => Err(AppError::validation(format!("Invalid category kind '{}'", s))),
        }
    }
}

/// Comparison key for category names: case-insensitive, accents significant
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomCategory {
    pub id: String,
    pub user_id: String,
    /// Unique per user under `name_key`
    pub name: String,
    pub icon: String,
    pub color: String,
    pub kind: CategoryKind,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub kind: CategoryKind,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl CreateCategoryRequest {
    pub fn into_category(self, user_id: &str) -> Result<CustomCategory> {
        let icon = match self.icon.as_deref() {
            Some(icon) if !icon.trim().is_empty() => {
                validation::required_text_max("icon", icon, validation::MAX_ICON_LENGTH)?
            }
            _ => DEFAULT_CATEGORY_ICON.to_string(),
        };
        let color = match self.color.as_deref() {
            Some(color) if !color.trim().is_empty() => validation::hex_color("color", color)?,
            _ => DEFAULT_CATEGORY_COLOR.to_string(),
        };

        Ok(CustomCategory {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: validation::required_text("name", &self.name)?,
            icon,
            color,
            kind: self.kind,
            created_at: chrono::Utc::now().naive_utc(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub kind: Option<CategoryKind>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl UpdateCategoryRequest {
    pub fn apply(self, category: &mut CustomCategory) -> Result<()> {
        if let Some(name) = self.name {
            category.name = validation::required_text("name", &name)?;
        }
        if let Some(kind) = self.kind {
            category.kind = kind;
        }
        if let Some(icon) = self.icon {
            category.icon =
                validation::required_text_max("icon", &icon, validation::MAX_ICON_LENGTH)?;
        }
        if let Some(color) = self.color {
            category.color = validation::hex_color("color", &color)?;
        }
        Ok(())
    }
}
