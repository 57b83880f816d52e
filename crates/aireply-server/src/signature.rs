//! Webhook Signature Verification
//!
//! Rejects webhook requests whose `X-Line-Signature` does not match the
//! body. Disabled when no channel secret is configured.

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use aireply_integration_line::SIGNATURE_HEADER;

use crate::AppState;

/// Largest webhook body accepted for verification
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Signature middleware
pub async fn signature_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if !state.webhook.requires_signature() {
        return Ok(next.run(request).await);
    }

    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|_| StatusCode::PAYLOAD_TOO_LARGE)?;

    let signature = parts
        .headers
        .get(SIGNATURE_HEADER)
        .and_then(|h| h.to_str().ok());

    match signature {
        Some(signature) if state.webhook.verify_signature(signature, &bytes) => {
            Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
        }
        Some(_) => {
            tracing::warn!("Invalid webhook signature");
            Err(StatusCode::UNAUTHORIZED)
        }
        None => {
            tracing::warn!("Missing webhook signature header");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
