pub mod installment_planner;
pub mod transaction_service;

pub use installment_planner::InstallmentPlanner;
pub use transaction_service::TransactionService;
