// HTTP handlers for envelope endpoints
//
// Endpoints (mounted under /api/envelopes):
// - GET    /{user_id}  - List envelopes, newest first
// - POST   /           - Create an envelope
// - PUT    /{id}       - Edit name, target, installment total, start date
// - PUT    /{id}/pay   - Pay one installment (atomic increment)
// - DELETE /{id}       - Delete an envelope

use actix_web::{web, HttpResponse};

use crate::core::Result;
use crate::middleware::AuthenticatedUser;
use crate::modules::envelopes::models::{
    CreateEnvelopeRequest, PayInstallmentRequest, UpdateEnvelopeRequest,
};
use crate::modules::envelopes::services::EnvelopeService;

pub async fn list_envelopes(
    service: web::Data<EnvelopeService>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    user.ensure_owner(&path)?;

    let envelopes = service.list(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(envelopes))
}

pub async fn create_envelope(
    service: web::Data<EnvelopeService>,
    user: AuthenticatedUser,
    request: web::Json<CreateEnvelopeRequest>,
) -> Result<HttpResponse> {
    let envelope = service.create(&user.user_id, request.into_inner()).await?;
    Ok(HttpResponse::Created().json(serde_json::json!({
        "id": envelope.id,
        "message": "Envelope created",
    })))
}

pub async fn update_envelope(
    service: web::Data<EnvelopeService>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    request: web::Json<UpdateEnvelopeRequest>,
) -> Result<HttpResponse> {
    let envelope = service
        .update(&path, &user.user_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(envelope))
}

/// PUT /api/envelopes/{id}/pay
///
/// # Request Body
/// ```json
/// { "amount": "50.00" }
/// ```
///
/// # Returns
/// - 200: `{id, amount_paid, installments_paid}`
/// - 400: amount not greater than zero
/// - 404: envelope not found
pub async fn pay_installment(
    service: web::Data<EnvelopeService>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    request: web::Json<PayInstallmentRequest>,
) -> Result<HttpResponse> {
    let receipt = service
        .pay(&path, &user.user_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(receipt))
}

pub async fn delete_envelope(
    service: web::Data<EnvelopeService>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    service.delete(&path, &user.user_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Envelope deleted" })))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_envelope))
        .route("/{id}/pay", web::put().to(pay_installment))
        .route("/{user_id}", web::get().to(list_envelopes))
        .route("/{id}", web::put().to(update_envelope))
        .route("/{id}", web::delete().to(delete_envelope));
}
