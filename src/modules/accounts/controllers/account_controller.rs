// HTTP handlers for account endpoints
//
// Endpoints (mounted under /api/accounts):
// - GET    /{user_id}      - List the caller's accounts, newest first
// - POST   /               - Create an account
// - PUT    /{id}           - Partially update an account
// - DELETE /{id}           - Delete an account no transaction references
// - GET    /{id}/balance   - Balance report from unpaid linked transactions

use actix_web::{web, HttpResponse};

use crate::core::Result;
use crate::middleware::AuthenticatedUser;
use crate::modules::accounts::models::{CreateAccountRequest, UpdateAccountRequest};
use crate::modules::accounts::services::AccountService;

pub async fn list_accounts(
    service: web::Data<AccountService>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    user.ensure_owner(&path)?;

    let accounts = service.list(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(accounts))
}

pub async fn create_account(
    service: web::Data<AccountService>,
    user: AuthenticatedUser,
    request: web::Json<CreateAccountRequest>,
) -> Result<HttpResponse> {
    let account = service.create(&user.user_id, request.into_inner()).await?;
    Ok(HttpResponse::Created().json(account))
}

pub async fn update_account(
    service: web::Data<AccountService>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    request: web::Json<UpdateAccountRequest>,
) -> Result<HttpResponse> {
    let account = service
        .update(&path, &user.user_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(account))
}

/// DELETE /api/accounts/{id}
///
/// # Returns
/// - 200: deleted
/// - 404: account not found
/// - 409: transactions still reference the account (count in message)
pub async fn delete_account(
    service: web::Data<AccountService>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    service.delete(&path, &user.user_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Account deleted" })))
}

/// GET /api/accounts/{id}/balance
///
/// Credit cards report `credit_limit`, `available` and
/// `utilization_percent` (null for a zero limit); other kinds report
/// `available_balance`.
pub async fn get_balance(
    service: web::Data<AccountService>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let report = service.balance(&path, &user.user_id).await?;
    Ok(HttpResponse::Ok().json(report))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_account))
        .route("/{id}/balance", web::get().to(get_balance))
        .route("/{user_id}", web::get().to(list_accounts))
        .route("/{id}", web::put().to(update_account))
        .route("/{id}", web::delete().to(delete_account));
}
