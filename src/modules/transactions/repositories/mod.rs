pub mod transaction_repository;

pub(crate) use transaction_repository::delete_unless_linked;
pub use transaction_repository::{MySqlTransactionRepository, TransactionRepository};
