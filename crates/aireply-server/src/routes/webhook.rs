//! Webhook Routes - Event Intake
//!
//! Receives a batch of platform events, answers every `"Ai "` command in
//! it, and returns once each event has been handled.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    middleware,
    routing::post,
    Router,
};
use utoipa::ToSchema;

use crate::signature::signature_middleware;
use crate::AppState;

/// Webhook body as sent by LINE
#[derive(Debug, ToSchema)]
pub struct WebhookRequest {
    /// Bot user ID the events are addressed to
    pub destination: Option<String>,
    /// Message, postback, follow, ... events
    #[schema(value_type = Vec<Object>)]
    pub events: Vec<serde_json::Value>,
}

/// Receive a webhook batch
#[utoipa::path(
    post,
    path = "/webhook",
    request_body = WebhookRequest,
    params(
        ("x-line-signature" = Option<String>, Header, description = "Base64 HMAC-SHA256 of the body; required when a channel secret is configured")
    ),
    responses(
        (status = 200, description = "All events dispatched"),
        (status = 400, description = "Body is not a webhook batch"),
        (status = 401, description = "Missing or invalid signature")
    ),
    tag = "Webhook"
)]
pub async fn receive_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, (StatusCode, String)> {
    let events = state.webhook.parse_events(&body).map_err(|e| {
        tracing::warn!(error = %e, "Rejecting webhook body");
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    let summary = state.dispatcher.dispatch(events).await;
    tracing::debug!(replies = %summary.replies_attempted(), "Webhook handled");

    Ok(StatusCode::OK)
}

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/webhook", post(receive_webhook))
        .route_layer(middleware::from_fn_with_state(state, signature_middleware))
}

#[cfg(test)]
mod tests {
    use aireply::DEFAULT_FALLBACK_TEXT;
    use aireply_integration_line::{sign_body, LineConfig, SIGNATURE_HEADER};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;
    use wiremock::matchers::{body_json, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::adapters::OpenAiConfig;
    use crate::config::AppConfig;
    use crate::{build_router, AppState};

    fn app(openai: &MockServer, line: &MockServer, channel_secret: Option<&str>) -> axum::Router {
        let mut line_config = LineConfig::new("line-token").with_base_urls(line.uri(), line.uri());
        line_config.channel_secret = channel_secret.map(str::to_string);

        let config = AppConfig {
            line: line_config,
            openai: OpenAiConfig::new("sk-test").with_base_url(openai.uri()),
            fallback_text: DEFAULT_FALLBACK_TEXT.to_string(),
        };
        build_router(AppState::from_config(config).unwrap())
    }

    fn webhook_request(body: &serde_json::Value, signature: Option<String>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/webhook")
            .header("content-type", "application/json");
        if let Some(signature) = signature {
            builder = builder.header(SIGNATURE_HEADER, signature);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn text_event(reply_token: &str, text: &str) -> serde_json::Value {
        serde_json::json!({
            "type": "message",
            "replyToken": reply_token,
            "source": { "type": "user", "userId": "U1" },
            "timestamp": 1700000000000_i64,
            "message": { "id": "m1", "type": "text", "text": text }
        })
    }

    fn completion(content: &str) -> serde_json::Value {
        serde_json::json!({
            "model": "gpt-3.5-turbo",
            "choices": [{ "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }]
        })
    }

    #[tokio::test]
    async fn test_command_in_mixed_batch_gets_single_reply() {
        let openai = MockServer::start().await;
        let line = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "messages": [{ "role": "user", "content": "hello" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("Hi from the model")))
            .expect(1)
            .mount(&openai)
            .await;

        Mock::given(method("POST"))
            .and(path("/v2/bot/message/reply"))
            .and(body_json(serde_json::json!({
                "replyToken": "r-1",
                "messages": [{ "type": "text", "text": "Hi from the model" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&line)
            .await;

        let body = serde_json::json!({
            "destination": "Ubot",
            "events": [
                text_event("r-1", "Ai hello"),
                text_event("r-2", "hello without prefix"),
                { "type": "postback", "replyToken": "r-3", "postback": { "data": "x" } },
                { "type": "message", "replyToken": "r-4", "message": { "id": "m4", "type": "sticker" } }
            ]
        });

        let response = app(&openai, &line, None)
            .oneshot(webhook_request(&body, None))
            .await
            .unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::OK);
        assert_eq!(line.received_requests().await.unwrap().len(), 1);
        assert_eq!(openai.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_completion_failure_replies_with_fallback() {
        let openai = MockServer::start().await;
        let line = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "error": { "message": "The server had an error" }
            })))
            .expect(1)
            .mount(&openai)
            .await;

        Mock::given(method("POST"))
            .and(path("/v2/bot/message/reply"))
            .and(body_json(serde_json::json!({
                "replyToken": "r-1",
                "messages": [{ "type": "text", "text": DEFAULT_FALLBACK_TEXT }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&line)
            .await;

        let body = serde_json::json!({ "events": [text_event("r-1", "Ai hello")] });
        let response = app(&openai, &line, None)
            .oneshot(webhook_request(&body, None))
            .await
            .unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::OK);
    }

    #[tokio::test]
    async fn test_reply_failure_still_returns_ok() {
        let openai = MockServer::start().await;
        let line = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("hi")))
            .mount(&openai)
            .await;

        Mock::given(method("POST"))
            .and(path("/v2/bot/message/reply"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({ "message": "Invalid reply token" })),
            )
            .expect(1)
            .mount(&line)
            .await;

        let body = serde_json::json!({ "events": [text_event("r-1", "Ai hello")] });
        let response = app(&openai, &line, None)
            .oneshot(webhook_request(&body, None))
            .await
            .unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_body_is_bad_request() {
        let openai = MockServer::start().await;
        let line = MockServer::start().await;

        let response = app(&openai, &line, None)
            .oneshot(webhook_request(&serde_json::json!({ "nope": true }), None))
            .await
            .unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_signature_is_enforced_when_secret_configured() {
        let openai = MockServer::start().await;
        let line = MockServer::start().await;
        let body = serde_json::json!({ "events": [text_event("r-1", "just chatting")] });

        let missing = app(&openai, &line, Some("channel-secret"))
            .oneshot(webhook_request(&body, None))
            .await
            .unwrap();
        assert_eq!(missing.status(), axum::http::StatusCode::UNAUTHORIZED);

        let wrong = app(&openai, &line, Some("channel-secret"))
            .oneshot(webhook_request(
                &body,
                Some(sign_body("other-secret", body.to_string().as_bytes())),
            ))
            .await
            .unwrap();
        assert_eq!(wrong.status(), axum::http::StatusCode::UNAUTHORIZED);

        let valid = app(&openai, &line, Some("channel-secret"))
            .oneshot(webhook_request(
                &body,
                Some(sign_body("channel-secret", body.to_string().as_bytes())),
            ))
            .await
            .unwrap();
        assert_eq!(valid.status(), axum::http::StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health() {
        let openai = MockServer::start().await;
        let line = MockServer::start().await;

        let response = app(&openai, &line, None)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::OK);
    }
}
