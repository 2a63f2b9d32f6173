// Rate limiting middleware using tower-governor
//
// Twilio bills per verification and enforces its own send limits; this
// keeps a single client from burning through them. Keyed per IP by
// `SmartIpKeyExtractor`: X-Forwarded-For, X-Real-IP, Forwarded, then the
// peer address. The first X-Forwarded-For hop is whatever the client sent,
// so deployments must sit behind a proxy that overwrites that header.
//
// Applied in app.rs to the verification routes only.
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};

/// How often idle per-IP buckets are dropped from the limiter
const LIMITER_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Seconds per replenished request slot
    pub per_second: u64,
    pub burst_size: u32,
}

/// Wrap `router` with a per-IP rate limit and start the background task
/// that prunes idle buckets. Must be called inside a Tokio runtime.
///
/// Responses carry `x-ratelimit-*` headers. An unusable configuration
/// (zero rate or burst) leaves the router unlimited and logs a warning.
pub fn with_rate_limit<S>(router: Router<S>, config: RateLimitConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let Some(governor_config) = GovernorConfigBuilder::default()
        .per_second(config.per_second)
        .burst_size(config.burst_size)
        .key_extractor(SmartIpKeyExtractor)
        .use_headers()
        .finish()
    else {
        tracing::warn!(?config, "Invalid rate limit configuration, rate limiting disabled");
        return router;
    };

    let limiter = governor_config.limiter().clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(LIMITER_CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            limiter.retain_recent();
            tracing::trace!(tracked_ips = limiter.len(), "Pruned rate limiter state");
        }
    });

    router.layer(GovernorLayer {
        config: Arc::new(governor_config),
    })
}
