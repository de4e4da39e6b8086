pub mod installment_plan;
pub mod transaction;

pub use installment_plan::{
    CreateInstallmentsRequest, InstallmentBatchResponse, InstallmentPlan, SplitPolicy,
};
pub use transaction::{
    CreateTransactionRequest, Transaction, TransactionDraft, TransactionKind,
    UpdateTransactionRequest, MAX_INSTALLMENTS,
};
