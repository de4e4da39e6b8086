//! fintrack personal-finance backend library
//!
//! Transactions with installment plans, savings envelopes, custom
//! categories and accounts with derived balances, served over actix-web.

pub mod app;
pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;
pub mod telemetry;

// Re-export commonly used types
pub use app::{AppServices, Repositories};
pub use core::{AppError, Result};
pub use modules::{accounts, categories, envelopes, health, transactions, users};
