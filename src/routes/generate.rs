use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{ErrorResponse, GenerateJobRequest, MatchRequest};
use crate::routes::AppState;

const NOT_CONFIGURED: &str = "Generator API key is not configured";

/// Configure generative routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/openai/generate", web::post().to(generate_job_description))
        .route("/openai/match", web::post().to(analyze_match));
}

/// Synthesize a job description from a prompt
///
/// POST /api/openai/generate
async fn generate_job_description(
    state: web::Data<AppState>,
    req: web::Json<GenerateJobRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Prompt is required", errors.to_string()));
    }

    let generator = match state.generator.as_deref() {
        Some(generator) => generator,
        None => {
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Failed to generate job description", NOT_CONFIGURED));
        }
    };

    match generator.generate_job_description(&req.prompt).await {
        Ok(job) => HttpResponse::Ok().json(job),
        Err(e) => {
            tracing::error!("Error generating job description: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Failed to generate job description", e.to_string()))
        }
    }
}

/// Score a candidate profile against a job
///
/// POST /api/openai/match
async fn analyze_match(state: web::Data<AppState>, req: web::Json<MatchRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Job description is required", errors.to_string()));
    }

    let generator = match state.generator.as_deref() {
        Some(generator) => generator,
        None => {
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Failed to analyze profile match", NOT_CONFIGURED));
        }
    };

    match generator.analyze_profile_match(&req.profile, &req.job).await {
        Ok(analysis) => HttpResponse::Ok().json(analysis),
        Err(e) => {
            tracing::error!("Error analyzing profile match for {}: {}", req.profile.id, e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Failed to analyze profile match", e.to_string()))
        }
    }
}
