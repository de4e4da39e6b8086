pub mod auth;
pub mod error_handler;
pub mod rate_limit;
pub mod request_id;

pub use auth::AuthenticatedUser;
pub use error_handler::{json_config, path_config, query_config};
pub use rate_limit::RateLimiter;
pub use request_id::{RequestId, RequestIdValue};
