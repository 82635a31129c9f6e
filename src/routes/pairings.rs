use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::core::PairingError;
use crate::models::{ErrorResponse, GeneratePairingsRequest, GeneratePairingsResponse, HealthResponse, RosterResponse};
use crate::services::{PairingService, PairingStore, RunOptions, ServiceError};

/// Application state shared across all handlers
pub struct AppState<S> {
    pub service: PairingService<S>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

/// Configure all pairing-related routes
pub fn configure<S: PairingStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/roster", web::get().to(get_roster::<S>))
        .route("/pairings/generate", web::post().to(generate_pairings::<S>));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn error_response(status: StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

/// Map a failed run to an HTTP status and short error label
fn classify(err: &ServiceError) -> (StatusCode, &'static str) {
    match err {
        ServiceError::Store(_) => (StatusCode::BAD_GATEWAY, "Roster store unavailable"),
        ServiceError::Pairing(PairingError::InsufficientPopulation { .. }) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "Not enough participants")
        }
        ServiceError::Pairing(PairingError::GroupUnsolvable { .. }) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "No valid arrangement found")
        }
        ServiceError::Pairing(PairingError::ReciprocityViolation { .. }) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Reciprocal assignment produced")
        }
        ServiceError::Pairing(PairingError::InvalidConfiguration(_)) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Invalid pairing configuration")
        }
    }
}

/// Current roster endpoint
///
/// GET /api/v1/roster
async fn get_roster<S: PairingStore + 'static>(state: web::Data<AppState<S>>) -> impl Responder {
    match state.service.store().load_roster().await {
        Ok(roster) => HttpResponse::Ok().json(RosterResponse {
            total_participants: roster.member_count(),
            ordinary: roster.ordinary,
            newcomers: roster.newcomers,
            leads: roster.leads,
            forbidden_pairs: roster.forbidden_pairs,
        }),
        Err(e) => {
            tracing::error!("Failed to load roster: {}", e);
            error_response(StatusCode::BAD_GATEWAY, "Failed to load roster", e.to_string())
        }
    }
}

/// Generate pairings endpoint
///
/// POST /api/v1/pairings/generate
///
/// Request body:
/// ```json
/// {
///   "seed": 42,
///   "maxAttempts": 100,
///   "dryRun": false
/// }
/// ```
async fn generate_pairings<S: PairingStore + 'static>(
    state: web::Data<AppState<S>>,
    req: web::Json<GeneratePairingsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for generate request: {:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let options = RunOptions {
        seed: req.seed,
        max_attempts: req.max_attempts,
        dry_run: req.dry_run,
    };

    match state.service.run(options).await {
        Ok(run) => HttpResponse::Ok().json(GeneratePairingsResponse {
            run_id: run.run_id.to_string(),
            seed: run.seed,
            persisted: run.persisted,
            assignments: run.result.assignments,
            metadata: run.result.metadata,
        }),
        Err(e) => {
            let (status, label) = classify(&e);
            if status.is_server_error() {
                tracing::error!("Pairing run failed: {}", e);
            } else {
                tracing::warn!("Pairing run rejected: {}", e);
            }
            error_response(status, label, e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Matcher;
    use crate::models::Roster;
    use crate::services::{InMemoryStore, StoreError};
    use actix_web::{test, App};
    use std::sync::Arc;

    fn state(roster: Roster) -> AppState<InMemoryStore> {
        AppState {
            service: PairingService::new(
                Arc::new(InMemoryStore::new(roster)),
                Matcher::with_default_attempts(),
                None,
            ),
        }
    }

    fn roster(ordinary: &[&str]) -> Roster {
        Roster {
            ordinary: ordinary.iter().map(|s| s.to_string()).collect(),
            ..Roster::default()
        }
    }

    #[actix_web::test]
    async fn test_classify_statuses() {
        let (status, _) = classify(&ServiceError::Store(StoreError::Unauthorized));
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (status, _) = classify(&ServiceError::Pairing(PairingError::GroupUnsolvable {
            size: 3,
            attempts: 100,
        }));
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = classify(&ServiceError::Pairing(PairingError::ReciprocityViolation {
            giver: "A".to_string(),
            receiver: "B".to_string(),
        }));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn test_generate_endpoint() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(roster(&["A", "B", "C", "D"]))))
                .configure(crate::routes::configure_routes::<InMemoryStore>),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/pairings/generate")
            .set_json(serde_json::json!({ "seed": 9, "dryRun": true }))
            .to_request();
        let resp: GeneratePairingsResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.seed, 9);
        assert!(!resp.persisted);
        assert_eq!(resp.assignments.len(), 4);
        assert_eq!(resp.metadata.total_participants, 4);
    }

    #[actix_web::test]
    async fn test_generate_rejects_invalid_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(roster(&["A", "B", "C"]))))
                .configure(crate::routes::configure_routes::<InMemoryStore>),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/pairings/generate")
            .set_json(serde_json::json!({ "maxAttempts": 0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_single_participant_is_unprocessable() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(roster(&["Solo"]))))
                .configure(crate::routes::configure_routes::<InMemoryStore>),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/pairings/generate")
            .set_json(serde_json::json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn test_roster_endpoint() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(roster(&["A", "B"]))))
                .configure(crate::routes::configure_routes::<InMemoryStore>),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/roster").to_request();
        let resp: RosterResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.total_participants, 2);
        assert_eq!(resp.ordinary, vec!["A", "B"]);
    }

    #[actix_web::test]
    async fn test_health_endpoint() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(Roster::default())))
                .configure(crate::routes::configure_routes::<InMemoryStore>),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let resp: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.status, "healthy");
    }
}
