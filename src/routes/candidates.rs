use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::catalog::{find_category, FILTER_CATEGORIES};
use crate::core::fallback::FallbackSearch;
use crate::core::filters::{FilterSet, SearchQuery, DEFAULT_PAGE};
use crate::core::mock;
use crate::models::{
    ErrorResponse, HealthResponse, JobDescription, Pagination, ProfileResponse, SearchFilters,
    SearchResponse, SelectionSearchRequest, SuggestionsQuery, SuggestionsResponse,
    TalentSearchResponse,
};
use crate::routes::AppState;
use crate::services::TalentSearch;

/// Configure candidate search routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/filters", web::get().to(filter_catalog))
        .route("/linkedin/suggestions", web::get().to(suggestions))
        .route("/linkedin/search", web::post().to(search))
        .route("/linkedin/search/selection", web::post().to(search_selection))
        .route("/linkedin/profile/{id}", web::get().to(profile))
        .route("/linkedin/talent-search", web::post().to(talent_search));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        provider_configured: state.provider.is_some(),
        generator_configured: state.generator.is_some(),
    })
}

/// Filter categories offered by the filter panel
async fn filter_catalog() -> impl Responder {
    HttpResponse::Ok().json(FILTER_CATEGORIES)
}

/// Filter suggestions endpoint
///
/// GET /api/linkedin/suggestions?filterKey={key}&query={text}
async fn suggestions(
    state: web::Data<AppState>,
    query: web::Query<SuggestionsQuery>,
) -> impl Responder {
    let SuggestionsQuery { filter_key, query } = query.into_inner();
    if find_category(&filter_key).is_none() {
        tracing::debug!("Suggestions requested for unknown filter key {}", filter_key);
    }

    let provider = match state.provider.as_deref() {
        Some(provider) => provider,
        None => {
            tracing::debug!("Missing API credentials, using mock suggestions for {}", filter_key);
            return HttpResponse::Ok().json(SuggestionsResponse {
                success: true,
                suggestions: mock::suggest(&filter_key, &query),
                fallback: None,
                error: None,
            });
        }
    };

    match provider.suggestions(&filter_key, &query).await {
        Ok(suggestions) => HttpResponse::Ok().json(SuggestionsResponse {
            success: true,
            suggestions,
            fallback: None,
            error: None,
        }),
        Err(e) => {
            tracing::warn!("Suggestions lookup for {} failed, falling back to mock data: {}", filter_key, e);
            HttpResponse::Ok().json(SuggestionsResponse {
                success: true,
                suggestions: mock::suggest(&filter_key, &query),
                fallback: Some(true),
                error: Some(e.to_string()),
            })
        }
    }
}

/// Candidate search endpoint
///
/// POST /api/linkedin/search
///
/// Request body:
/// ```json
/// {
///   "jobTitle": ["Software Engineer"],
///   "excludedCompany": ["Acme"],
///   "page": 1,
///   "pageSize": 10
/// }
/// ```
async fn search(state: web::Data<AppState>, req: web::Json<SearchFilters>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Validation failed", errors.to_string()));
    }

    let mut filters = req.into_inner();
    if filters.page_size.is_none() {
        filters.page_size = Some(state.search.default_page_size);
    }

    run_search(&state, filters.to_query()).await
}

/// Candidate search from a raw filter selection
///
/// POST /api/linkedin/search/selection
///
/// Request body:
/// ```json
/// {
///   "filters": [{"id": "jt-1", "value": "Software Engineer", "type": "include", "category": "jobTitle"}],
///   "page": 2
/// }
/// ```
async fn search_selection(
    state: web::Data<AppState>,
    req: web::Json<SelectionSearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Validation failed", errors.to_string()));
    }

    let req = req.into_inner();
    let selection: FilterSet = req.filters.into_iter().collect();
    let query = selection.to_query(
        req.page.unwrap_or(DEFAULT_PAGE),
        req.page_size.unwrap_or(state.search.default_page_size),
    );

    run_search(&state, query).await
}

async fn run_search(state: &AppState, query: SearchQuery) -> HttpResponse {
    if !query.has_criteria() {
        tracing::debug!("Search without filter criteria, nothing to do");
        return HttpResponse::Ok().json(SearchResponse {
            success: true,
            results: Vec::new(),
            pagination: Pagination {
                total: 0,
                page: query.pagination.page,
                page_size: query.pagination.page_size,
                has_more: false,
            },
            mock: None,
            fallback: None,
            error: None,
        });
    }

    let provider = match state.provider.as_deref() {
        Some(provider) => provider,
        None => {
            tracing::debug!("Missing API credentials, using mock search results");
            return HttpResponse::Ok().json(SearchResponse {
                success: true,
                results: mock::generate_mock_results(&query),
                pagination: mock::mock_pagination(Some(query.pagination.page), Some(query.pagination.page_size)),
                mock: Some(true),
                fallback: None,
                error: None,
            });
        }
    };

    match provider.search_candidates(&query).await {
        Ok((results, pagination)) => {
            tracing::info!("Returning {} candidates (total: {})", results.len(), pagination.total);
            HttpResponse::Ok().json(SearchResponse {
                success: true,
                results,
                pagination,
                mock: None,
                fallback: None,
                error: None,
            })
        }
        Err(e) => {
            tracing::warn!("Candidate search failed, falling back to mock data: {}", e);
            HttpResponse::Ok().json(SearchResponse {
                success: true,
                results: mock::generate_mock_results(&query),
                pagination: mock::mock_pagination(Some(query.pagination.page), Some(query.pagination.page_size)),
                mock: None,
                fallback: Some(true),
                error: Some(e.to_string()),
            })
        }
    }
}

/// Single profile lookup
///
/// GET /api/linkedin/profile/{id}
async fn profile(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let profile_id = path.into_inner();

    let provider = match state.provider.as_deref() {
        Some(provider) => provider,
        None => {
            return HttpResponse::Ok().json(ProfileResponse {
                success: true,
                profile: mock::generate_mock_profile(&profile_id),
                mock: Some(true),
                fallback: None,
                error: None,
            });
        }
    };

    match provider.profile(&profile_id).await {
        Ok(profile) => HttpResponse::Ok().json(ProfileResponse {
            success: true,
            profile,
            mock: None,
            fallback: None,
            error: None,
        }),
        Err(e) => {
            tracing::warn!("Profile lookup for {} failed, falling back to mock data: {}", profile_id, e);
            HttpResponse::Ok().json(ProfileResponse {
                success: true,
                profile: mock::generate_mock_profile(&profile_id),
                mock: None,
                fallback: Some(true),
                error: Some(e.to_string()),
            })
        }
    }
}

/// AI-assisted search from a job description
///
/// POST /api/linkedin/talent-search
///
/// Request body:
/// ```json
/// {
///   "title": "Backend Engineer",
///   "location": "Bangalore",
///   "experienceLevel": "Senior",
///   "skills": ["Rust", "Kafka"],
///   "description": "..."
/// }
/// ```
async fn talent_search(state: web::Data<AppState>, req: web::Json<JobDescription>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Job description is required",
            errors.to_string(),
        ));
    }

    let talent = TalentSearch::new(
        state.provider.as_deref(),
        state.generator.as_deref(),
        FallbackSearch::new(state.search.min_results),
    );
    let outcome = talent.search(&req).await;

    let message = outcome.profiles.is_empty().then(|| {
        "No profiles found. Try adjusting your job description or skills requirements.".to_string()
    });

    HttpResponse::Ok().json(TalentSearchResponse {
        profiles: outcome.profiles,
        message,
        mock: outcome.mock.then_some(true),
    })
}
