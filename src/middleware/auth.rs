use actix_web::{dev::Payload, http::header, web, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::core::{AppError, Result};
use crate::modules::users::services::TokenService;

/// Caller identity resolved from `Authorization: Bearer <token>`.
///
/// Handlers that take this extractor reject requests with a missing,
/// malformed or expired token as `401`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
}

impl AuthenticatedUser {
    /// Reject access to another user's partition
    pub fn ensure_owner(&self, user_id: &str) -> Result<()> {
        if self.user_id != user_id {
            return Err(AppError::forbidden("Cannot access another user's records"));
        }
        Ok(())
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser> {
    if let Some(user) = req.extensions().get::<AuthenticatedUser>() {
        return Ok(user.clone());
    }

    let tokens = req
        .app_data::<web::Data<TokenService>>()
        .ok_or_else(|| AppError::internal("Token service not configured"))?;

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::unauthorized("Missing bearer token"))?;

    let claims = tokens.verify(token)?;
    let user = AuthenticatedUser {
        user_id: claims.sub,
        email: claims.email,
    };

    // Cache for any later extractor in the same request
    req.extensions_mut().insert(user.clone());
    Ok(user)
}
