pub mod account;
pub mod balance_report;

pub use account::{
    Account, AccountKind, CreateAccountRequest, UpdateAccountRequest, DEFAULT_ACCOUNT_COLOR,
    DEFAULT_ACCOUNT_ICON,
};
pub use balance_report::{BalanceReport, Exposure};
