use actix_cors::Cors;
use actix_web::{http::header, App, HttpServer};
use anyhow::Context;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

use fintrack::config::{Config, DatabaseConfig, SecurityConfig};
use fintrack::middleware::{RateLimiter, RequestId};
use fintrack::{telemetry, AppServices};

const RATE_LIMIT_PRUNE_SECS: u64 = 300;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    telemetry::init(&config.app.log_level, config.app.log_format)?;

    tracing::info!("Starting fintrack");
    tracing::info!(env = config.app.env.as_str(), "Environment");
    tracing::info!(
        split_policy = %config.app.split_policy,
        "Default installment split policy"
    );

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;

    tracing::info!(
        pool_size = config.database.pool_size,
        max_connections = config.database.max_connections,
        "Database pool initialized"
    );

    DatabaseConfig::run_migrations(&db_pool)
        .await
        .context("Failed to run database migrations")?;

    let services = AppServices::from_config(&config, &db_pool);
    let rate_limiter = RateLimiter::new(config.security.rate_limit_per_minute)?;
    actix_web::rt::spawn(
        rate_limiter
            .clone()
            .prune_periodically(Duration::from_secs(RATE_LIMIT_PRUNE_SECS)),
    );
    let security = config.security.clone();

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        let services = services.clone();

        App::new()
            .wrap(cors(&security))
            .wrap(rate_limiter.clone())
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .configure(|cfg| services.configure(cfg))
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!(
        workers = config.server.workers,
        "Server started at http://{}",
        bind_address
    );

    server.await.context("Server terminated with an error")
}

fn cors(security: &SecurityConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(3600);

    if security.cors_allowed_origins.is_empty() {
        return cors.allow_any_origin();
    }

    security
        .cors_allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
