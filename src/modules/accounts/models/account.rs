use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{money, validation, AppError, Result};

pub const DEFAULT_ACCOUNT_COLOR: &str = "#3B82F6";
pub const DEFAULT_ACCOUNT_ICON: &str = "CreditCard";

/// Kind of money container an account represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    CreditCard,
    DebitCard,
    Checking,
    Savings,
    Cash,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreditCard => "credit_card",
            Self::DebitCard => "debit_card",
            Self::Checking => "checking",
            Self::Savings => "savings",
            Self::Cash => "cash",
        }
    }

    pub fn is_credit(&self) -> bool {
        matches!(self, Self::CreditCard)
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccountKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "credit_card" => Ok(Self::CreditCard),
            "debit_card" => Ok(Self::DebitCard),
            "checking" => Ok(Self::Checking),
            "savings" => Ok(Self::Savings),
            "cash" => Ok(Self::Cash),
            _ => Err(AppError::validation(format!("Invalid account kind '{}'", s))),
        }
    }
}

/// A bank account, card or cash wallet owned by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub kind: AccountKind,
    /// Only meaningful for credit cards
    pub credit_limit: Decimal,
    /// May be negative (overdrawn)
    pub current_balance: Decimal,
    pub color: String,
    pub icon: String,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

/// Request body for POST /api/accounts
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
    pub kind: AccountKind,
    #[serde(default)]
    pub credit_limit: Decimal,
    #[serde(default)]
    pub current_balance: Decimal,
    pub color: Option<String>,
    pub icon: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl CreateAccountRequest {
    pub fn into_account(self, user_id: &str) -> Result<Account> {
        let color = match self.color.as_deref() {
            Some(color) if !color.trim().is_empty() => validation::hex_color("color", color)?,
            _ => DEFAULT_ACCOUNT_COLOR.to_string(),
        };
        let icon = match self.icon.as_deref() {
            Some(icon) if !icon.trim().is_empty() => {
                validation::required_text_max("icon", icon, validation::MAX_ICON_LENGTH)?
            }
            _ => DEFAULT_ACCOUNT_ICON.to_string(),
        };

        Ok(Account {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: validation::required_text("name", &self.name)?,
            kind: self.kind,
            credit_limit: money::non_negative_amount("credit_limit", self.credit_limit)?,
            current_balance: money::signed_amount("current_balance", self.current_balance)?,
            color,
            icon,
            active: self.active,
            created_at: chrono::Utc::now().naive_utc(),
        })
    }
}

/// Request body for PUT /api/accounts/{id}
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAccountRequest {
    pub name: Option<String>,
    pub kind: Option<AccountKind>,
    pub credit_limit: Option<Decimal>,
    pub current_balance: Option<Decimal>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub active: Option<bool>,
}

impl UpdateAccountRequest {
    pub fn apply(self, account: &mut Account) -> Result<()> {
        if let Some(name) = self.name {
            account.name = validation::required_text("name", &name)?;
        }
        if let Some(kind) = self.kind {
            account.kind = kind;
        }
        if let Some(limit) = self.credit_limit {
            account.credit_limit = money::non_negative_amount("credit_limit", limit)?;
        }
        if let Some(balance) = self.current_balance {
            account.current_balance = money::signed_amount("current_balance", balance)?;
        }
        if let Some(color) = self.color {
            account.color = validation::hex_color("color", &color)?;
        }
        if let Some(icon) = self.icon {
            account.icon = validation::required_text_max("icon", &icon, validation::MAX_ICON_LENGTH)?;
        }
        if let Some(active) = self.active {
            account.active = active;
        }

        Ok(())
    }
}
