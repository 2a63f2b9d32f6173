//! Phone Verification Bridge Server
//!
//! Serves the verification form and the JSON endpoints that forward to
//! Twilio Verify.

use anyhow::{Context, Result};
use server_core::server::{build_app, AppOptions};
use server_core::{kernel::ServerDeps, Config, TWILIO_ENV_VARS};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting Phone Verification Bridge");

    // Load environment variables
    dotenvy::dotenv().ok();

    // Log masked env vars for deployment troubleshooting
    fn mask_env(name: &str) {
        match std::env::var(name) {
            Ok(val) if val.is_empty() => tracing::info!("  {}: (empty)", name),
            Ok(val) => {
                let show = val.char_indices().nth(4).map_or(val.len(), |(i, _)| i);
                tracing::info!(
                    "  {}: {}{}  ({} chars)",
                    name,
                    &val[..show],
                    "*".repeat(val.chars().count().saturating_sub(4)),
                    val.chars().count()
                );
            }
            Err(_) => tracing::warn!("  {}: NOT SET", name),
        }
    }
    tracing::info!("Environment variables:");
    for name in TWILIO_ENV_VARS
        .iter()
        .chain(&["PORT", "ALLOWED_ORIGINS", "TWILIO_VERIFY_BASE_URL"])
    {
        mask_env(name);
    }

    let config = Config::from_env().context("Failed to load configuration")?;

    if config.missing_twilio_vars.is_empty() {
        tracing::info!("Twilio Verify configured");
    } else {
        tracing::error!(
            missing = ?config.missing_twilio_vars,
            "Twilio environment variables are not set. Verification requests will fail."
        );
    }

    let deps = ServerDeps::from_config(&config)?;
    let app = build_app(deps, AppOptions::from(&config));

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Server listening on {}", addr);
    tracing::info!("Verification form: http://localhost:{}/", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
