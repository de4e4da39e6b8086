// Accounts module: cards, bank accounts and their balance projection

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Account, AccountKind, BalanceReport, Exposure};
pub use repositories::{AccountRepository, MySqlAccountRepository};
pub use services::{AccountBalanceCalculator, AccountService};
