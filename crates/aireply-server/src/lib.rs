//! aireply Server
//!
//! HTTP surface and infrastructure adapters:
//!
//! - `POST /webhook` - LINE webhook intake
//! - `GET /health` - liveness
//! - `/swagger-ui` - OpenAPI documentation

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use aireply::{CompletionOptions, EventDispatcher, ResponseOrchestrator};
use aireply_integration_line::{LineIntegration, LineWebhookHandler};

pub mod adapters;
pub mod config;
pub mod routes;
pub mod signature;

use adapters::OpenAiClient;
use config::AppConfig;

/// Type aliases for application services with concrete adapters
pub type AppOrchestrator = ResponseOrchestrator<OpenAiClient, LineIntegration>;
pub type AppDispatcher = EventDispatcher<OpenAiClient, LineIntegration>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<AppDispatcher>,
    pub webhook: Arc<LineWebhookHandler>,
}

impl AppState {
    /// Build clients and services from configuration
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let webhook = LineWebhookHandler::from_config(&config.line);
        let line = LineIntegration::new(config.line)?;
        let openai = OpenAiClient::new(config.openai)?;

        let orchestrator = ResponseOrchestrator::new(
            Arc::new(openai),
            Arc::new(line),
            CompletionOptions::default(),
        )
        .with_fallback_text(config.fallback_text);

        Ok(Self {
            dispatcher: Arc::new(EventDispatcher::new(Arc::new(orchestrator))),
            webhook: Arc::new(webhook),
        })
    }
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "aireply is listening for \"Ai \" commands".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::webhook::router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
