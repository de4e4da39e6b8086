use std::sync::Arc;

use tracing::info;

use crate::core::traits::GuardedDelete;
use crate::core::{AppError, Result};
use crate::modules::accounts::models::{
    Account, BalanceReport, CreateAccountRequest, UpdateAccountRequest,
};
use crate::modules::accounts::repositories::AccountRepository;
use crate::modules::transactions::repositories::TransactionRepository;

use super::balance_calculator::AccountBalanceCalculator;

/// Account lifecycle plus the balance projection
pub struct AccountService {
    accounts: Arc<dyn AccountRepository>,
    transactions: Arc<dyn TransactionRepository>,
}

impl AccountService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        transactions: Arc<dyn TransactionRepository>,
    ) -> Self {
        Self {
            accounts,
            transactions,
        }
    }

    pub async fn create(&self, user_id: &str, request: CreateAccountRequest) -> Result<Account> {
        let account = request.into_account(user_id)?;
        self.accounts.create(&account).await?;

        info!(
            user_id = user_id,
            account_id = account.id.as_str(),
            kind = %account.kind,
            "Account created"
        );
        Ok(account)
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<Account>> {
        self.accounts.list_by_user(user_id).await
    }

    pub async fn get(&self, id: &str, user_id: &str) -> Result<Account> {
        self.accounts
            .find_by_id(id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Account '{}' not found", id)))
    }

    pub async fn update(
        &self,
        id: &str,
        user_id: &str,
        request: UpdateAccountRequest,
    ) -> Result<Account> {
        let mut account = self.get(id, user_id).await?;
        request.apply(&mut account)?;

        if !self.accounts.update(&account).await? {
            return Err(AppError::not_found(format!("Account '{}' not found", id)));
        }
        Ok(account)
    }

    /// Delete an account that no transaction references
    pub async fn delete(&self, id: &str, user_id: &str) -> Result<()> {
        match self.accounts.delete_unreferenced(id, user_id).await? {
            GuardedDelete::Deleted => {}
            GuardedDelete::NotFound => {
                return Err(AppError::not_found(format!("Account '{}' not found", id)));
            }
            GuardedDelete::Referenced(references) => {
                return Err(AppError::conflict(format!(
                    "Account is linked to {} transaction(s) and cannot be deleted",
                    references
                )));
            }
        }

        info!(user_id = user_id, account_id = id, "Account deleted");
        Ok(())
    }

    pub async fn balance(&self, id: &str, user_id: &str) -> Result<BalanceReport> {
        let account = self.get(id, user_id).await?;
        let unpaid = self
            .transactions
            .find_unpaid_by_account(&account.id, user_id)
            .await?;

        Ok(AccountBalanceCalculator::balance(&account, &unpaid))
    }
}
