use aireply_server::config::AppConfig;
use aireply_server::{build_router, AppState};

#[shuttle_runtime::main]
async fn main(
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("🤖 aireply initializing...");

    let config = AppConfig::from_secrets(&secrets)?;

    if config.line.channel_secret.is_some() {
        tracing::info!("🔐 Webhook signature verification enabled");
    } else {
        tracing::warn!("⚠️  No LINE_CHANNEL_SECRET set - signature verification disabled");
    }
    tracing::info!(
        model = %config.openai.completion.model,
        vision_model = %config.openai.completion.vision_model,
        "🧠 Completion backend configured"
    );

    let state = AppState::from_config(config)?;
    let router = build_router(state);

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ aireply ready - POST /webhook");

    Ok(router.into())
}
