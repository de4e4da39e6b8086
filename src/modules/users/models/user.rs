use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::{validation, AppError, Result};

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// A registered user; `password_hash` never leaves the server
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

/// Request body for POST /api/register
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    /// Returns the trimmed name and normalised email
    pub fn validate(&self) -> Result<(String, String)> {
        let name = validation::required_text("name", &self.name)?;
        let email = validation::email(&self.email)?;

        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::validation(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        Ok((name, email))
    }
}

/// Request body for POST /api/login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Identity plus bearer token returned by register and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub token: String,
}
