// TestDependencies - mock implementations for testing
//
// Provides a recording verification provider that can be injected into
// ServerDeps in place of Twilio.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use twilio::Channel;

use super::{BaseVerificationService, ServerDeps};

// =============================================================================
// Mock Verification Service
// =============================================================================

/// Arguments captured from a start_verification call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartCallArgs {
    pub phone_number: String,
    pub channel: Channel,
    pub custom_code: Option<String>,
}

/// Arguments captured from a check_verification call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckCallArgs {
    pub phone_number: String,
    pub code: String,
}

/// Provider response: a status string or an error message.
type MockResponse = std::result::Result<String, String>;

#[derive(Clone, Default)]
pub struct MockVerificationService {
    start_responses: Arc<Mutex<Vec<MockResponse>>>,
    check_responses: Arc<Mutex<Vec<MockResponse>>>,
    start_calls: Arc<Mutex<Vec<StartCallArgs>>>,
    check_calls: Arc<Mutex<Vec<CheckCallArgs>>>,
}

impl MockVerificationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a status for the next start call (default: `pending`)
    pub fn with_start_status(self, status: &str) -> Self {
        self.start_responses
            .lock()
            .unwrap()
            .push(Ok(status.to_string()));
        self
    }

    /// Queue a provider failure for the next start call
    pub fn with_start_error(self, message: &str) -> Self {
        self.start_responses
            .lock()
            .unwrap()
            .push(Err(message.to_string()));
        self
    }

    /// Queue a status for the next check call (default: `approved`)
    pub fn with_check_status(self, status: &str) -> Self {
        self.check_responses
            .lock()
            .unwrap()
            .push(Ok(status.to_string()));
        self
    }

    /// Queue a provider failure for the next check call
    pub fn with_check_error(self, message: &str) -> Self {
        self.check_responses
            .lock()
            .unwrap()
            .push(Err(message.to_string()));
        self
    }

    pub fn start_calls(&self) -> Vec<StartCallArgs> {
        self.start_calls.lock().unwrap().clone()
    }

    pub fn check_calls(&self) -> Vec<CheckCallArgs> {
        self.check_calls.lock().unwrap().clone()
    }

    /// Total provider calls of either kind
    pub fn call_count(&self) -> usize {
        self.start_calls.lock().unwrap().len() + self.check_calls.lock().unwrap().len()
    }

    /// ServerDeps backed by this mock
    pub fn into_deps(self) -> ServerDeps {
        ServerDeps::new(Some(Arc::new(self)))
    }
}

fn next_response(queue: &Mutex<Vec<MockResponse>>, default: &str) -> Result<String> {
    let mut queue = queue.lock().unwrap();
    let response = if queue.is_empty() {
        Ok(default.to_string())
    } else {
        queue.remove(0)
    };
    response.map_err(|message| anyhow::anyhow!(message))
}

#[async_trait]
impl BaseVerificationService for MockVerificationService {
    async fn start_verification(
        &self,
        phone_number: &str,
        channel: Channel,
        custom_code: Option<&str>,
    ) -> Result<String> {
        self.start_calls.lock().unwrap().push(StartCallArgs {
            phone_number: phone_number.to_string(),
            channel,
            custom_code: custom_code.map(str::to_string),
        });
        next_response(&self.start_responses, "pending")
    }

    async fn check_verification(&self, phone_number: &str, code: &str) -> Result<String> {
        self.check_calls.lock().unwrap().push(CheckCallArgs {
            phone_number: phone_number.to_string(),
            code: code.to_string(),
        });
        next_response(&self.check_responses, "approved")
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Bundles the mocks a test needs and hands out ServerDeps wired to them.
///
/// The mock is shared (Arc-backed), so calls made through the deps are
/// visible on `verifier`.
pub struct TestDependencies {
    pub verifier: MockVerificationService,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            verifier: MockVerificationService::new(),
        }
    }

    pub fn with_verifier(verifier: MockVerificationService) -> Self {
        Self { verifier }
    }

    pub fn server_deps(&self) -> ServerDeps {
        self.verifier.clone().into_deps()
    }

    /// ServerDeps as they look when Twilio credentials are missing
    pub fn unconfigured() -> ServerDeps {
        ServerDeps::new(None)
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
