use std::sync::Arc;

use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::accounts::repositories::AccountRepository;
use crate::modules::categories::repositories::CategoryRepository;
use crate::modules::transactions::models::{
    CreateInstallmentsRequest, CreateTransactionRequest, InstallmentBatchResponse, SplitPolicy,
    Transaction, UpdateTransactionRequest,
};
use crate::modules::transactions::repositories::TransactionRepository;

use super::installment_planner::InstallmentPlanner;

/// Transaction service for business logic
///
/// Owns single-entry CRUD and installment batches. Account and category
/// links are checked against the caller's own records before any write.
pub struct TransactionService {
    transactions: Arc<dyn TransactionRepository>,
    accounts: Arc<dyn AccountRepository>,
    categories: Arc<dyn CategoryRepository>,
    default_policy: SplitPolicy,
}

impl TransactionService {
    pub fn new(
        transactions: Arc<dyn TransactionRepository>,
        accounts: Arc<dyn AccountRepository>,
        categories: Arc<dyn CategoryRepository>,
        default_policy: SplitPolicy,
    ) -> Self {
        Self {
            transactions,
            accounts,
            categories,
            default_policy,
        }
    }

    pub async fn create(
        &self,
        user_id: &str,
        request: CreateTransactionRequest,
    ) -> Result<Transaction> {
        let draft = request.into_draft(user_id)?;
        self.ensure_links(
            user_id,
            draft.account_id.as_deref(),
            draft.custom_category_id.as_deref(),
        )
        .await?;

        let transaction = Transaction::from_draft(draft);
        self.transactions.create(&transaction).await?;

        info!(
            user_id = user_id,
            transaction_id = transaction.id.as_str(),
            kind = %transaction.kind,
            "Transaction created"
        );
        Ok(transaction)
    }

    /// Split one purchase into monthly installments and persist them
    /// atomically.
    ///
    /// The request's `split_policy` wins over the deployment default.
    pub async fn create_installments(
        &self,
        user_id: &str,
        request: CreateInstallmentsRequest,
    ) -> Result<InstallmentBatchResponse> {
        let policy = request.split_policy.unwrap_or(self.default_policy);
        let plan = InstallmentPlanner::plan(&request, user_id, policy)?;

        if let Some(first) = plan.drafts.first() {
            self.ensure_links(
                user_id,
                first.account_id.as_deref(),
                first.custom_category_id.as_deref(),
            )
            .await?;
        }

        let transactions: Vec<Transaction> = plan
            .drafts
            .into_iter()
            .map(Transaction::from_draft)
            .collect();

        self.transactions.create_batch(&transactions).await?;

        let count = transactions.len();
        info!(
            user_id = user_id,
            count = count,
            policy = %policy,
            group_id = plan.group_id.as_deref().unwrap_or("-"),
            "Installments created"
        );

        Ok(InstallmentBatchResponse {
            ids: transactions.into_iter().map(|t| t.id).collect(),
            group_id: plan.group_id,
            count,
            split_policy: policy,
            message: format!("{} installment(s) created", count),
        })
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.transactions.list_by_user(user_id).await
    }

    /// Installments of one group; an unknown group is `NotFound`
    pub async fn list_group(&self, group_id: &str, user_id: &str) -> Result<Vec<Transaction>> {
        let installments = self.transactions.find_by_group(group_id, user_id).await?;
        if installments.is_empty() {
            return Err(AppError::not_found(format!(
                "Installment group '{}' not found",
                group_id
            )));
        }
        Ok(installments)
    }

    pub async fn update(
        &self,
        id: &str,
        user_id: &str,
        request: UpdateTransactionRequest,
    ) -> Result<Transaction> {
        let mut transaction = self
            .transactions
            .find_by_id(id, user_id)
            .await?
            .ok_or_else(|| transaction_not_found(id))?;

        if request.is_empty() {
            return Ok(transaction);
        }

        let relinks_account = request.account_id.is_some();
        let relinks_category = request.custom_category_id.is_some();
        request.apply(&mut transaction)?;

        self.ensure_links(
            user_id,
            transaction.account_id.as_deref().filter(|_| relinks_account),
            transaction
                .custom_category_id
                .as_deref()
                .filter(|_| relinks_category),
        )
        .await?;

        if !self.transactions.update(&transaction).await? {
            return Err(transaction_not_found(id));
        }
        Ok(transaction)
    }

    pub async fn delete(&self, id: &str, user_id: &str) -> Result<()> {
        if !self.transactions.delete(id, user_id).await? {
            return Err(transaction_not_found(id));
        }

        info!(user_id = user_id, transaction_id = id, "Transaction deleted");
        Ok(())
    }

    /// Linked account and category must exist among the caller's records
    async fn ensure_links(
        &self,
        user_id: &str,
        account_id: Option<&str>,
        category_id: Option<&str>,
    ) -> Result<()> {
        if let Some(account_id) = account_id {
            if self.accounts.find_by_id(account_id, user_id).await?.is_none() {
                return Err(AppError::not_found(format!(
                    "Account '{}' not found",
                    account_id
                )));
            }
        }

        if let Some(category_id) = category_id {
            if self
                .categories
                .find_by_id(category_id, user_id)
                .await?
                .is_none()
            {
                return Err(AppError::not_found(format!(
                    "Category '{}' not found",
                    category_id
                )));
            }
        }

        Ok(())
    }
}

fn transaction_not_found(id: &str) -> AppError {
    AppError::not_found(format!("Transaction '{}' not found", id))
}
