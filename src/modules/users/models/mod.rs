pub mod user;

pub use user::{AuthResponse, LoginRequest, RegisterRequest, User, MIN_PASSWORD_LENGTH};
