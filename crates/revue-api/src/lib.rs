//! Revue API - REST server for the album-review service
//!
//! Provides HTTP endpoints for registration, login, and paginated review
//! access with ownership-enforced mutations.

pub mod album;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod reviews;
pub mod routes;
pub mod state;
pub mod store;

use axum::{routing::get, Router};
use state::AppState;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI document for the service
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::reviews::list_by_album,
        handlers::reviews::list_by_user,
        handlers::reviews::get_review,
        handlers::reviews::create_review,
        handlers::reviews::update_review,
        handlers::reviews::delete_review,
        handlers::health::health_check,
    ),
    components(schemas(
        handlers::auth::RegisterRequest,
        handlers::auth::LoginRequest,
        handlers::auth::RegisterResponse,
        handlers::auth::AuthResponse,
        handlers::reviews::DeleteReviewResponse,
        handlers::health::HealthResponse,
        reviews::ReviewInput,
        reviews::ReviewPatch,
        reviews::ReviewSummary,
        error::ApiError,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "reviews", description = "Paginated review access and owner-only mutations"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Build the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/api", routes::api_routes(state.clone()))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
