pub mod repository;

pub use repository::{GuardedDelete, Repository};
