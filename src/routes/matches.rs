use crate::core::{MatchEngine, MAX_RESULTS};
use crate::models::{
    ContactRequest, ContactResponse, ContactedResponse, ErrorResponse, FindMatchesRequest,
    FindMatchesResponse, HealthResponse,
};
use crate::services::{CacheKey, CacheManager, ContactStatus, DirectoryClient, DirectoryError, ContactStore};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<DirectoryClient>,
    pub cache: Arc<CacheManager>,
    pub contacts: Arc<ContactStore>,
    pub engine: MatchEngine,
    pub default_limit: usize,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/matches/contact", web::post().to(contact_manufacturer))
        .route("/matches/contacted", web::get().to(get_contacted));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.contacts.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Rank manufacturers for a project
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "projectId": "string",
///   "limit": 50
/// }
/// ```
///
/// A failed match run surfaces as a successful response with an empty
/// list rather than a 5xx; a missing project is a 404.
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let project_id = &req.project_id;
    let limit = req
        .limit
        .map(|l| l as usize)
        .unwrap_or(state.default_limit)
        .min(MAX_RESULTS);

    tracing::info!("Finding matches for project: {}, limit: {}", project_id, limit);

    let project = match state.directory.get_project(project_id).await {
        Ok(project) => project,
        Err(DirectoryError::NotFound(msg)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Project not found".to_string(),
                message: msg,
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to load project {}: {}", project_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load project".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let cache_key = CacheKey::matches(project_id, project.updated_at);
    if let Ok(mut cached) = state.cache.get::<FindMatchesResponse>(&cache_key).await {
        tracing::debug!("Serving cached matches for project {}", project_id);
        cached.matches.truncate(limit);
        return HttpResponse::Ok().json(cached);
    }

    // Fail-soft: data issues during pool construction degrade to an
    // empty result, never an error response.
    let candidates = match state.directory.find_active_manufacturers().await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!(
                "Failed to load candidate pool for project {}: {}",
                project_id,
                e
            );
            return HttpResponse::Ok().json(FindMatchesResponse {
                matches: vec![],
                total_candidates: 0,
            });
        }
    };

    let total_candidates = candidates.len();
    tracing::debug!("Scoring {} candidates for project {}", total_candidates, project_id);

    let mut matches = state
        .engine
        .rank_manufacturers(&project.requirements, candidates)
        .await;

    let response = FindMatchesResponse {
        matches: matches.clone(),
        total_candidates,
    };
    if let Err(e) = state.cache.set(&cache_key, &response).await {
        tracing::warn!("Failed to cache matches for project {}: {}", project_id, e);
    }

    matches.truncate(limit);

    tracing::info!(
        "Returning {} matches for project {} (from {} candidates)",
        matches.len(),
        project_id,
        total_candidates
    );

    HttpResponse::Ok().json(FindMatchesResponse {
        matches,
        total_candidates,
    })
}

/// Record that a brand contacted a manufacturer
///
/// POST /api/v1/matches/contact
///
/// Request body:
/// ```json
/// {
///   "projectId": "string",
///   "manufacturerId": "string",
///   "matchScore": 82,
///   "status": "contacted"
/// }
/// ```
async fn contact_manufacturer(
    state: web::Data<AppState>,
    req: web::Json<ContactRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let status = match req.status.as_deref() {
        None => ContactStatus::Contacted,
        Some(raw) => match ContactStatus::parse(raw) {
            Ok(status) => status,
            Err(e) => {
                return HttpResponse::BadRequest().json(ErrorResponse {
                    error: "Invalid contact status".to_string(),
                    message: e.to_string(),
                    status_code: 400,
                });
            }
        },
    };

    // PostgreSQL is the primary record.
    let store_result = state
        .contacts
        .record_contact(
            &req.project_id,
            &req.manufacturer_id,
            req.match_score.map(|s| s as i32),
            status,
        )
        .await;

    match store_result {
        Ok(_) => {
            // Mirror into the document store best-effort, so the
            // marketplace UI sees the transition too.
            if let Err(e) = state
                .directory
                .record_contact_event(&req.project_id, &req.manufacturer_id, req.match_score)
                .await
            {
                tracing::warn!(
                    "Contact stored in PostgreSQL but document-store mirror failed: {}",
                    e
                );
            }

            HttpResponse::Ok().json(ContactResponse {
                success: true,
                contact_id: uuid::Uuid::new_v4().to_string(),
            })
        }
        Err(e) => {
            tracing::error!("Failed to record contact: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to record contact".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// List contacted manufacturers for a project
///
/// GET /api/v1/matches/contacted?projectId={projectId}
async fn get_contacted(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let project_id = match query.get("projectId") {
        Some(id) => id,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing projectId parameter".to_string(),
                message: "projectId query parameter is required".to_string(),
                status_code: 400,
            });
        }
    };

    match state.contacts.get_contacted_ids(project_id).await {
        Ok(contacted) => {
            let count = contacted.len();
            HttpResponse::Ok().json(ContactedResponse {
                project_id: project_id.clone(),
                contacted,
                count,
            })
        }
        Err(e) => {
            tracing::error!("Failed to fetch contacted list for {}: {}", project_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch contacted manufacturers".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
