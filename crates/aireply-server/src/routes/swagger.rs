//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use super::webhook::WebhookRequest;

#[derive(OpenApi)]
#[openapi(
    paths(super::webhook::receive_webhook),
    components(schemas(WebhookRequest)),
    tags(
        (name = "Webhook", description = "Messaging platform event intake")
    ),
    info(
        title = "aireply API",
        description = "Answers \"Ai \"-prefixed chat messages with an LLM completion"
    )
)]
pub struct ApiDoc;
