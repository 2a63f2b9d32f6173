//! Check verification action

use tracing::{error, info};

use super::required_phone;
use crate::domains::verification::errors::VerificationError;
use crate::domains::verification::phone::{hash_phone_number, redact_phone};
use crate::domains::verification::types::VerificationOutcome;
use crate::kernel::BaseVerificationService;

/// Ask the provider whether `code` matches the pending verification for
/// `phone`.
///
/// A non-approved status is an outcome, not an error.
pub async fn check_verification(
    verifier: &dyn BaseVerificationService,
    phone: Option<&str>,
    code: &str,
) -> Result<VerificationOutcome, VerificationError> {
    let phone_number = required_phone(phone)?;
    if code.is_empty() {
        return Err(VerificationError::MissingCode);
    }
    let phone_hash = hash_phone_number(&phone_number);

    let status = verifier
        .check_verification(&phone_number, code)
        .await
        .map_err(|e| {
            error!(
                phone_hash = %phone_hash,
                error = %redact_phone(&e.to_string(), &phone_number),
                "Twilio API error checking verification"
            );
            VerificationError::Provider {
                operation: "check",
                message: e.to_string(),
            }
        })?;

    let outcome = VerificationOutcome::from_status(status);
    info!(
        phone_hash = %phone_hash,
        status = %outcome.status(),
        approved = outcome.is_approved(),
        "Verification checked"
    );

    Ok(outcome)
}
