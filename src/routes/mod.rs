// Route exports
pub mod auth;
pub mod recommendations;

use actix_web::{error, web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;

use crate::core::MatchEngine;
use crate::models::{ErrorResponse, HealthResponse};
use crate::services::PostgresStore;
use auth::TokenValidator;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: MatchEngine,
    pub tokens: Arc<TokenValidator>,
    /// Database probed by the health check, if the engine runs on one
    pub database: Option<PostgresStore>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(recommendations::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = match &state.database {
        Some(db) => db.health_check().await.unwrap_or(false),
        None => true,
    };

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Handle query string errors with a JSON body
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query payload error on {}: {}", req.path(), err);
    let body = ErrorResponse::new("invalid_query", format!("Invalid query: {}", err), 400);
    error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}
