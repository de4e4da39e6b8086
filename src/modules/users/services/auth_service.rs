use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::core::{validation, AppError, Result};
use crate::modules::users::models::{AuthResponse, LoginRequest, RegisterRequest, User};
use crate::modules::users::repositories::UserRepository;

use super::password::{hash_password_off_worker, verify_password_off_worker};
use super::token::TokenService;

/// Shown for both unknown email and wrong password
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Registration and login
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse> {
        let (name, email) = request.validate()?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email is already registered"));
        }

        let password_hash = hash_password_off_worker(request.password).await?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            password_hash,
            created_at: chrono::Utc::now().naive_utc(),
        };
        self.users.create(&user).await?;

        info!(user_id = user.id.as_str(), "User registered");
        self.respond(user)
    }

    /// Unknown email is `NotFound` and a wrong password is `Unauthorized`,
    /// both with the same message.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse> {
        let email = validation::email(&request.email)
            .map_err(|_| AppError::not_found(INVALID_CREDENTIALS))?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::not_found(INVALID_CREDENTIALS))?;

        let matches =
            verify_password_off_worker(request.password, user.password_hash.clone()).await?;
        if !matches {
            warn!(user_id = user.id.as_str(), "Login rejected: password mismatch");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        info!(user_id = user.id.as_str(), "User logged in");
        self.respond(user)
    }

    fn respond(&self, user: User) -> Result<AuthResponse> {
        let token = self.tokens.issue(&user.id, &user.email)?;

        Ok(AuthResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            token,
        })
    }
}
