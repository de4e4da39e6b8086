pub mod accounts;
pub mod categories;
pub mod envelopes;
pub mod health;
pub mod transactions;
pub mod users;
