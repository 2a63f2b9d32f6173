// ServerDeps - dependencies injected into HTTP handlers
//
// Built once at startup from Config. Handlers never read the environment.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use twilio::{Channel, TwilioOptions, TwilioService};

use crate::config::Config;
use crate::kernel::BaseVerificationService;

// =============================================================================
// TwilioService Adapter (implements BaseVerificationService trait)
// =============================================================================

/// Wrapper around TwilioService that implements BaseVerificationService trait
pub struct TwilioAdapter(pub Arc<TwilioService>);

impl TwilioAdapter {
    pub fn new(service: Arc<TwilioService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseVerificationService for TwilioAdapter {
    async fn start_verification(
        &self,
        phone_number: &str,
        channel: Channel,
        custom_code: Option<&str>,
    ) -> Result<String> {
        self.0
            .start_verification(phone_number, channel, custom_code)
            .await
            .map(|verification| verification.status)
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn check_verification(&self, phone_number: &str, code: &str) -> Result<String> {
        self.0
            .check_verification(phone_number, code)
            .await
            .map(|check| check.status)
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to handlers (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    /// `None` when provider credentials are missing; every verification
    /// request then fails closed with a configuration error.
    pub verifier: Option<Arc<dyn BaseVerificationService>>,
}

impl ServerDeps {
    pub fn new(verifier: Option<Arc<dyn BaseVerificationService>>) -> Self {
        Self { verifier }
    }

    /// Wire the Twilio client from resolved configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let Some(twilio) = &config.twilio else {
            return Ok(Self::new(None));
        };

        let mut service = TwilioService::new(TwilioOptions {
            account_sid: twilio.account_sid.clone(),
            auth_token: twilio.auth_token.clone(),
            service_id: twilio.verify_service_sid.clone(),
        })
        .context("Failed to create Twilio client")?;
        if let Some(base_url) = &config.twilio_verify_base_url {
            service = service.with_base_url(base_url.clone());
        }

        let verifier: Arc<dyn BaseVerificationService> =
            Arc::new(TwilioAdapter::new(Arc::new(service)));
        Ok(Self::new(Some(verifier)))
    }

    pub fn provider_configured(&self) -> bool {
        self.verifier.is_some()
    }
}
