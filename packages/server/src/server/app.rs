//! Application setup and server configuration.

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::kernel::ServerDeps;
use crate::server::middleware::{extract_client_ip, with_rate_limit, RateLimitConfig};
use crate::server::routes::{
    check_verification_handler, confirm_verification_handler, health_handler,
    start_verification_handler,
};
use crate::server::static_files::serve_client;

/// Router options that vary per deployment
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
    /// `None` disables rate limiting
    pub rate_limit: Option<RateLimitConfig>,
}

impl From<&Config> for AppOptions {
    fn from(config: &Config) -> Self {
        Self {
            allowed_origins: config.allowed_origins.clone(),
            rate_limit: config.rate_limit,
        }
    }
}

/// Verification routes, mounted at the root and under `/api`
fn verification_routes() -> Router {
    Router::new()
        .route("/start-verification", post(start_verification_handler))
        .route("/check-verification", post(check_verification_handler))
        .route("/confirm-verification", post(confirm_verification_handler))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid allowed origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps, options: AppOptions) -> Router {
    let mut verification = Router::new()
        .merge(verification_routes())
        .nest("/api", verification_routes());

    // Rate limit: per client IP, verification routes only
    if let Some(rate_limit) = options.rate_limit {
        verification = with_rate_limit(verification, rate_limit);
    }

    Router::new()
        .merge(verification)
        // Health check (no rate limit)
        .route("/health", get(health_handler))
        // Client view
        .fallback_service(get(serve_client))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(extract_client_ip))
        .layer(Extension(deps))
        .layer(cors_layer(&options.allowed_origins))
        .layer(TraceLayer::new_for_http())
}
