use actix_web::{web, HttpResponse};

use crate::core::Result;
use crate::middleware::AuthenticatedUser;
use crate::modules::categories::models::{CreateCategoryRequest, UpdateCategoryRequest};
use crate::modules::categories::services::CategoryService;

/// GET /api/categories/{user_id}
pub async fn list_categories(
    service: web::Data<CategoryService>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    user.ensure_owner(&path)?;

    let categories = service.list(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(categories))
}

/// POST /api/categories
///
/// 409 when the caller already has a category with the same name.
pub async fn create_category(
    service: web::Data<CategoryService>,
    user: AuthenticatedUser,
    request: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse> {
    let category = service.create(&user.user_id, request.into_inner()).await?;
    Ok(HttpResponse::Created().json(category))
}

/// PUT /api/categories/{id}
pub async fn update_category(
    service: web::Data<CategoryService>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    request: web::Json<UpdateCategoryRequest>,
) -> Result<HttpResponse> {
    let category = service
        .update(&path, &user.user_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(category))
}

/// DELETE /api/categories/{id}
///
/// 409 naming the count when transactions still use the category.
pub async fn delete_category(
    service: web::Data<CategoryService>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    service.delete(&path, &user.user_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Category deleted" })))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_category))
        .route("/{user_id}", web::get().to(list_categories))
        .route("/{id}", web::put().to(update_category))
        .route("/{id}", web::delete().to(delete_category));
}
