//! Start verification action

use tracing::{error, info};
use twilio::Channel;

use super::required_phone;
use crate::domains::verification::errors::VerificationError;
use crate::domains::verification::phone::{hash_phone_number, redact_phone};
use crate::domains::verification::types::VerificationStarted;
use crate::kernel::BaseVerificationService;

/// Send a one-time code to `phone` through the provider.
///
/// `phone` is normalized to E.164 first. An empty `custom_code` is treated
/// as absent.
pub async fn start_verification(
    verifier: &dyn BaseVerificationService,
    phone: Option<&str>,
    channel: Channel,
    custom_code: Option<&str>,
) -> Result<VerificationStarted, VerificationError> {
    let phone_number = required_phone(phone)?;
    let custom_code = custom_code.filter(|code| !code.is_empty());
    let phone_hash = hash_phone_number(&phone_number);

    let status = verifier
        .start_verification(&phone_number, channel, custom_code)
        .await
        .map_err(|e| {
            error!(
                phone_hash = %phone_hash,
                error = %redact_phone(&e.to_string(), &phone_number),
                "Twilio API error starting verification"
            );
            VerificationError::Provider {
                operation: "start",
                message: e.to_string(),
            }
        })?;

    info!(
        phone_hash = %phone_hash,
        channel = %channel,
        status = %status,
        "Verification code sent"
    );

    Ok(VerificationStarted {
        phone_number,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::verification::phone::PhoneError;
    use crate::kernel::MockVerificationService;

    #[tokio::test]
    async fn test_sends_normalized_number() {
        let mock = MockVerificationService::new();

        let started = start_verification(&mock, Some("(555) 555-0100"), Channel::Sms, None)
            .await
            .unwrap();

        assert_eq!(started.phone_number, "+15555550100");
        assert_eq!(started.status, "pending");
        let calls = mock.start_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].phone_number, "+15555550100");
        assert_eq!(calls[0].channel, Channel::Sms);
        assert_eq!(calls[0].custom_code, None);
    }

    #[tokio::test]
    async fn test_missing_phone_skips_provider() {
        let mock = MockVerificationService::new();

        for phone in [None, Some("")] {
            let err = start_verification(&mock, phone, Channel::Sms, None)
                .await
                .unwrap_err();
            assert!(matches!(err, VerificationError::MissingPhone));
        }
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_phone_skips_provider() {
        let mock = MockVerificationService::new();

        let err = start_verification(&mock, Some("12345"), Channel::Sms, None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            VerificationError::InvalidPhone(PhoneError::NotTenDigits { digits: 5 })
        ));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_custom_code_forwarded_and_empty_dropped() {
        let mock = MockVerificationService::new();

        start_verification(&mock, Some("+15555550100"), Channel::Sms, Some("424242"))
            .await
            .unwrap();
        start_verification(&mock, Some("+15555550100"), Channel::Sms, Some(""))
            .await
            .unwrap();

        let calls = mock.start_calls();
        assert_eq!(calls[0].custom_code.as_deref(), Some("424242"));
        assert_eq!(calls[1].custom_code, None);
    }

    #[tokio::test]
    async fn test_provider_error_is_surfaced() {
        let mock = MockVerificationService::new().with_start_error("Max send attempts reached");

        let err = start_verification(&mock, Some("+15555550100"), Channel::Sms, None)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Failed to start verification: Max send attempts reached"
        );
    }
}
