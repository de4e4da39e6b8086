use actix_web::{web, HttpResponse};

use crate::core::Result;
use crate::modules::users::models::{LoginRequest, RegisterRequest};
use crate::modules::users::services::AuthService;

/// POST /api/register
///
/// # Returns
/// - 201: `{id, name, email, token}`
/// - 400: invalid name, email or password
/// - 409: email already registered
pub async fn register(
    service: web::Data<AuthService>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    let response = service.register(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

/// POST /api/login
///
/// # Returns
/// - 200: `{id, name, email, token}`
/// - 404: unknown email
/// - 401: wrong password
pub async fn login(
    service: web::Data<AuthService>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let response = service.login(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login));
}
