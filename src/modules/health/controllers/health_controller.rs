use actix_web::{web, HttpResponse, Responder};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;

/// Dependency check behind GET /ready
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    async fn database_ready(&self) -> bool;
}

#[async_trait]
impl ReadinessProbe for MySqlPool {
    async fn database_ready(&self) -> bool {
        match sqlx::query("SELECT 1").execute(self).await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(error = %e, "Database readiness check failed");
                false
            }
        }
    }
}

/// Health check response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// Readiness probe response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub database: bool,
}

/// GET / - Service index
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "fintrack",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "auth": ["/api/register", "/api/login"],
            "transactions": "/api/transactions/{user_id}",
            "envelopes": "/api/envelopes/{user_id}",
            "categories": "/api/categories/{user_id}",
            "accounts": "/api/accounts/{user_id}",
        }
    }))
}

/// GET /health - Liveness probe; does not touch dependencies
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /ready - 200 when the database answers, 503 otherwise
pub async fn readiness_check(probe: web::Data<dyn ReadinessProbe>) -> impl Responder {
    let database = probe.database_ready().await;
    let response = ReadinessResponse {
        ready: database,
        database,
    };

    if database {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/health", web::get().to(health_check))
        .route("/ready", web::get().to(readiness_check));
}
