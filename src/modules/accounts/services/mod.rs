pub mod account_service;
pub mod balance_calculator;

pub use account_service::AccountService;
pub use balance_calculator::AccountBalanceCalculator;
