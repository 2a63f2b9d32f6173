// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Phone normalization and status interpretation live in domains/verification.
//
// Naming convention: Base* for trait names (e.g., BaseVerificationService)

use anyhow::Result;
use async_trait::async_trait;
use twilio::Channel;

// =============================================================================
// Verification Provider Trait (Infrastructure - SMS/OTP)
// =============================================================================

#[async_trait]
pub trait BaseVerificationService: Send + Sync {
    /// Dispatch a one-time code to an E.164 phone number.
    /// Returns the provider status (normally `pending`).
    async fn start_verification(
        &self,
        phone_number: &str,
        channel: Channel,
        custom_code: Option<&str>,
    ) -> Result<String>;

    /// Check a code for an E.164 phone number.
    /// Returns the provider status; `approved` means the code matched.
    async fn check_verification(&self, phone_number: &str, code: &str) -> Result<String>;
}
