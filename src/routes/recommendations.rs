use actix_web::{web, HttpResponse, Responder, ResponseError};
use validator::Validate;

use crate::models::{ErrorResponse, RecommendationQuery};
use crate::routes::auth::{AuthenticatedUser, Role};
use crate::routes::AppState;

/// Configure recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/recommendations")
            .route("/jobs", web::get().to(recommend_jobs))
            .route("/candidates/{job_id}", web::get().to(recommend_candidates)),
    );
}

/// Recommended jobs for the calling job seeker
///
/// GET /api/v1/recommendations/jobs?limit=10
async fn recommend_jobs(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<RecommendationQuery>,
) -> impl Responder {
    if let Err(e) = user.require(Role::JobSeeker) {
        return e.error_response();
    }
    if let Err(errors) = query.validate() {
        return validation_failed(errors);
    }

    tracing::info!("Recommending jobs for seeker {}", user.user_id);

    match state.engine.recommend_jobs_for_seeker(user.user_id).await {
        Ok(mut results) => {
            if let Some(limit) = query.limit {
                results.truncate(limit);
            }
            tracing::info!("Returning {} jobs for seeker {}", results.len(), user.user_id);
            HttpResponse::Ok().json(results)
        }
        Err(e) => {
            tracing::error!("Error getting job recommendations for {}: {}", user.user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Recommendation failed",
                "Error getting job recommendations",
                500,
            ))
        }
    }
}

/// Recommended candidates for one of the employer's jobs
///
/// GET /api/v1/recommendations/candidates/{job_id}?limit=10
async fn recommend_candidates(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
    query: web::Query<RecommendationQuery>,
) -> impl Responder {
    if let Err(e) = user.require(Role::Employer) {
        return e.error_response();
    }
    if let Err(errors) = query.validate() {
        return validation_failed(errors);
    }

    let job_id = path.into_inner();
    tracing::info!("Recommending candidates for job {} (employer {})", job_id, user.user_id);

    match state.engine.recommend_candidates_for_job(job_id).await {
        Ok(mut results) => {
            if let Some(limit) = query.limit {
                results.truncate(limit);
            }
            tracing::info!("Returning {} candidates for job {}", results.len(), job_id);
            HttpResponse::Ok().json(results)
        }
        Err(e) => {
            tracing::error!("Error getting candidate recommendations for job {}: {}", job_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Recommendation failed",
                "Error getting candidate recommendations",
                500,
            ))
        }
    }
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new("Validation failed", errors.to_string(), 400))
}
