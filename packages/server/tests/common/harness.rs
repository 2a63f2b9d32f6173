//! Test harness: the full router wired to a recording mock provider.
//!
//! No network and no Twilio credentials; each test gets its own mock.

use server_core::kernel::{MockVerificationService, TestDependencies};
use server_core::server::middleware::RateLimitConfig;
use server_core::server::{build_app, AppOptions};

use super::HttpClient;

pub struct TestHarness {
    pub deps: TestDependencies,
    pub client: HttpClient,
}

fn init_tracing() {
    // Run tests with: RUST_LOG=debug cargo test -- --nocapture
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

impl TestHarness {
    /// Provider answers `pending` to starts and `approved` to checks
    pub fn new() -> Self {
        Self::with_verifier(MockVerificationService::new())
    }

    pub fn with_verifier(verifier: MockVerificationService) -> Self {
        Self::build(verifier, AppOptions::default())
    }

    pub fn with_rate_limit(per_second: u64, burst_size: u32) -> Self {
        Self::build(
            MockVerificationService::new(),
            AppOptions {
                rate_limit: Some(RateLimitConfig {
                    per_second,
                    burst_size,
                }),
                ..AppOptions::default()
            },
        )
    }

    /// Server started without Twilio credentials
    pub fn unconfigured() -> Self {
        init_tracing();
        Self {
            deps: TestDependencies::new(),
            client: HttpClient::new(build_app(
                TestDependencies::unconfigured(),
                AppOptions::default(),
            )),
        }
    }

    fn build(verifier: MockVerificationService, options: AppOptions) -> Self {
        init_tracing();
        let deps = TestDependencies::with_verifier(verifier);
        let client = HttpClient::new(build_app(deps.server_deps(), options));
        Self { deps, client }
    }

    pub fn verifier(&self) -> &MockVerificationService {
        &self.deps.verifier
    }
}
