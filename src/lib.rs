use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
// Conditionally import SwaggerUi only when needed (not test)
#[cfg(not(test))]
use utoipa_swagger_ui::SwaggerUi;
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::env;
use utoipa::OpenApi;
// Conditionally import CORS only when needed (not test)
#[cfg(not(test))]
use tower_http::cors::{Any, CorsLayer};
// Conditionally import Governor only when needed (not test)
#[cfg(not(test))]
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
#[cfg(not(test))]
use std::num::NonZeroU32;
#[cfg(not(test))]
use std::sync::Arc;

pub mod entities;
pub mod error;
pub mod routes;
pub mod services;

/// Process-wide configuration, loaded once at startup and passed down.
#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
}

impl Settings {
    pub fn from_env() -> Self {
        Settings {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://./data.db?mode=rwc".to_string()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string()),
        }
    }
}

/// Shared application state handed to every route handler.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

/// Service banner with pointers to docs and health
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner")
    )
)]
async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "event-horizon api",
        "docs": "/docs",
        "health": "/api/health",
    }))
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "EVENT HORIZON API",
        version = "0.1.0"
    ),
    paths(
        root,
        health_check,
        routes::campaigns::list_campaigns,
        routes::campaigns::get_campaign_detail,
        routes::campaigns::create_campaign,
        routes::campaigns::update_campaign,
        routes::campaigns::replace_stretch_goals,
        routes::campaigns::submit_votes,
        routes::campaigns::submit_availability,
        routes::campaigns::add_campaign_contribution,
        routes::campaigns::get_campaign_analytics,
        routes::events::list_event_options,
        routes::rooms::create_room,
        routes::rooms::get_room
    ),
    components(schemas(
        routes::campaigns::CampaignCreate,
        routes::campaigns::CampaignUpdate,
        routes::campaigns::CampaignRead,
        routes::campaigns::EventOptionCreate,
        routes::campaigns::StretchGoalCreate,
        routes::campaigns::PrivateContributionCreate,
        routes::campaigns::VotePayload,
        routes::campaigns::AvailabilityPayload,
        routes::campaigns::ApiMessage,
        routes::rooms::RoomCreate,
        services::analytics::TeamAnalytics,
        entities::campaign::Model,
        entities::event_option::Model,
        entities::stretch_goal::Model,
        entities::private_contribution::Model,
        entities::vote::Model,
        entities::availability::Model,
        entities::room::Model,
        entities::department::Model,
        entities::CampaignStatus,
        entities::EventCategory,
        entities::BadgeType,
        entities::StringList
    ))
)]
struct ApiDoc;

/// Create the application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // Build our API documentation (needed regardless for ApiDoc::openapi())
    let api_doc = ApiDoc::openapi();

    // --- Define API routes separately ---
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route(
            "/campaigns",
            get(routes::campaigns::list_campaigns).post(routes::campaigns::create_campaign),
        )
        .route(
            "/campaigns/{campaign_id}",
            get(routes::campaigns::get_campaign_detail).put(routes::campaigns::update_campaign),
        )
        .route(
            "/campaigns/{campaign_id}/stretch-goals",
            put(routes::campaigns::replace_stretch_goals),
        )
        .route(
            "/campaigns/{campaign_id}/votes",
            post(routes::campaigns::submit_votes),
        )
        .route(
            "/campaigns/{campaign_id}/availability",
            post(routes::campaigns::submit_availability),
        )
        .route(
            "/campaigns/{campaign_id}/contributions",
            post(routes::campaigns::add_campaign_contribution),
        )
        .route(
            "/campaigns/{campaign_id}/analytics",
            get(routes::campaigns::get_campaign_analytics),
        )
        .route("/event-options", get(routes::events::list_event_options))
        .route("/rooms", post(routes::rooms::create_room))
        .route("/rooms/{room_token}", get(routes::rooms::get_room));

    // --- Conditionally apply layers and Swagger UI only when NOT running tests ---
    #[cfg(not(test))]
    let (docs_router, rate_limited_api_routes) = {
        // Create Swagger UI router
        let docs_router = SwaggerUi::new("/docs").url("/api-doc/openapi.json", api_doc);

        // Configure Rate Limiting
        let governor_conf = Arc::new(
            GovernorConfigBuilder::default()
                .key_extractor(SmartIpKeyExtractor)
                .period(std::time::Duration::from_secs(60))
                .burst_size(NonZeroU32::new(30).unwrap().into())
                .finish()
                .unwrap(),
        );
        // Apply Governor layer ONLY to the api_routes defined above
        let rate_limited_api_routes = api_routes.layer(GovernorLayer {
            config: governor_conf,
        });

        (docs_router, rate_limited_api_routes)
    };

    // For test builds, use the original api_routes and an empty router for docs
    #[cfg(test)]
    let (docs_router, rate_limited_api_routes) = {
        let _ = api_doc;
        (Router::new(), api_routes)
    };

    // --- Build the final application router ---
    #[allow(unused_mut)]
    let mut app = Router::new()
        .route("/", get(root))
        .nest("/api", rate_limited_api_routes)
        .merge(docs_router);

    // --- Apply CORS to the whole app (both API and docs) if needed ---
    #[cfg(not(test))]
    {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    // Return the final router
    app.with_state(state)
}
