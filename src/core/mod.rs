pub mod error;
pub mod money;
pub mod traits;
pub mod validation;

pub use error::{AppError, Result};
