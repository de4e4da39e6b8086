// Transactions module: single entries and installment batches

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{
    CreateInstallmentsRequest, CreateTransactionRequest, InstallmentPlan, SplitPolicy,
    Transaction, TransactionKind,
};
pub use repositories::{MySqlTransactionRepository, TransactionRepository};
pub use services::{InstallmentPlanner, TransactionService};
