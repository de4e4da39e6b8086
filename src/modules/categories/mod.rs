// Custom categories module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{CategoryKind, CustomCategory};
pub use repositories::{CategoryRepository, MySqlCategoryRepository};
pub use services::CategoryService;
