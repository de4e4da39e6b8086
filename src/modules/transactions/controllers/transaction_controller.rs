// HTTP handlers for transaction endpoints
//
// Endpoints (mounted under /api/transactions):
// - GET    /{user_id}           - List transactions, newest date first
// - POST   /                    - Create a single transaction
// - POST   /installments        - Split a purchase into monthly installments
// - GET    /group/{group_id}    - Installments sharing one group tag
// - PUT    /{id}                - Partially update a transaction
// - DELETE /{id}                - Delete a transaction

use actix_web::{web, HttpResponse};

use crate::core::Result;
use crate::middleware::AuthenticatedUser;
use crate::modules::transactions::models::{
    CreateInstallmentsRequest, CreateTransactionRequest, UpdateTransactionRequest,
};
use crate::modules::transactions::services::TransactionService;

pub async fn list_transactions(
    service: web::Data<TransactionService>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    user.ensure_owner(&path)?;

    let transactions = service.list(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(transactions))
}

/// POST /api/transactions
///
/// # Returns
/// - 201: `{id, message}`
/// - 400: invalid kind, negative value, malformed date, bad installment position
/// - 404: linked account or category not found
pub async fn create_transaction(
    service: web::Data<TransactionService>,
    user: AuthenticatedUser,
    request: web::Json<CreateTransactionRequest>,
) -> Result<HttpResponse> {
    let transaction = service.create(&user.user_id, request.into_inner()).await?;
    Ok(HttpResponse::Created().json(serde_json::json!({
        "id": transaction.id,
        "message": "Transaction created",
    })))
}

/// POST /api/transactions/installments
///
/// # Request Body
/// ```json
/// {
///   "total_value": "1200.00",
///   "installment_count": 3,
///   "start_date": "2025-01-31",
///   "category": "Electronics",
///   "kind": "expense",
///   "description": "Laptop",
///   "split_policy": "divide_exact"
/// }
/// ```
///
/// # Returns
/// - 201: `{ids, group_id, count, split_policy, message}`
/// - 400: count outside 1..=120, negative total, unknown policy
pub async fn create_installments(
    service: web::Data<TransactionService>,
    user: AuthenticatedUser,
    request: web::Json<CreateInstallmentsRequest>,
) -> Result<HttpResponse> {
    let response = service
        .create_installments(&user.user_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(response))
}

pub async fn list_group(
    service: web::Data<TransactionService>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let installments = service.list_group(&path, &user.user_id).await?;
    Ok(HttpResponse::Ok().json(installments))
}

pub async fn update_transaction(
    service: web::Data<TransactionService>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    request: web::Json<UpdateTransactionRequest>,
) -> Result<HttpResponse> {
    let transaction = service
        .update(&path, &user.user_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(transaction))
}

pub async fn delete_transaction(
    service: web::Data<TransactionService>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    service.delete(&path, &user.user_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Transaction deleted" })))
}

/// Configure transaction routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_transaction))
        .route("/installments", web::post().to(create_installments))
        .route("/group/{group_id}", web::get().to(list_group))
        .route("/{user_id}", web::get().to(list_transactions))
        .route("/{id}", web::put().to(update_transaction))
        .route("/{id}", web::delete().to(delete_transaction));
}
