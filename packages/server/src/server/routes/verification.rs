//! Verification endpoints
//!
//! - `POST /start-verification` sends a code.
//! - `POST /check-verification` checks a code. Without a code it sends one
//!   instead (kept for existing clients, logged as a warning).
//! - `POST /confirm-verification` checks a code and never sends.

use axum::{
    extract::{rejection::JsonRejection, Extension},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};
use twilio::Channel;

use crate::domains::verification::actions::{self, require_verifier};
use crate::domains::verification::{
    extract_code, VerificationError, VerificationOutcome, VerificationStarted,
};
use crate::kernel::ServerDeps;
use crate::server::middleware::ClientIp;

pub const CODE_SENT_MESSAGE: &str = "Verification code sent.";
pub const APPROVED_MESSAGE: &str = "Verification successful.";
pub const DENIED_MESSAGE: &str = "Verification failed. The code is invalid or has expired.";

// =============================================================================
// Request / response bodies
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartVerificationRequest {
    pub phone: Option<String>,
    #[serde(default)]
    pub channel: Option<Channel>,
    pub custom_code: Option<String>,
}

/// Accepts `{phone, code}` or the inbound-SMS shape `{phoneNumber, textMessage}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckVerificationRequest {
    pub phone: Option<String>,
    pub code: Option<String>,
    pub phone_number: Option<String>,
    pub text_message: Option<String>,
}

impl CheckVerificationRequest {
    /// Resolve to `(phone, code)`. Empty strings count as absent; a text
    /// message must contain a 6-digit code.
    fn resolve(self) -> Result<(String, Option<String>), VerificationError> {
        let phone = non_empty(self.phone)
            .or_else(|| non_empty(self.phone_number))
            .ok_or(VerificationError::MissingPhone)?;

        let code = match (non_empty(self.code), non_empty(self.text_message)) {
            (Some(code), _) => Some(code),
            (None, Some(text)) => Some(extract_code(&text).ok_or(VerificationError::CodeNotFound)?),
            (None, None) => None,
        };

        Ok((phone, code))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartVerificationResponse {
    pub success: bool,
    pub message: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckVerificationResponse {
    pub success: bool,
    pub status: String,
    pub message: String,
}

impl From<VerificationOutcome> for CheckVerificationResponse {
    fn from(outcome: VerificationOutcome) -> Self {
        match outcome {
            VerificationOutcome::Approved { status } => Self {
                success: true,
                status,
                message: APPROVED_MESSAGE.to_string(),
            },
            VerificationOutcome::Denied { status } => Self {
                success: false,
                status,
                message: DENIED_MESSAGE.to_string(),
            },
        }
    }
}

impl From<VerificationStarted> for CheckVerificationResponse {
    fn from(started: VerificationStarted) -> Self {
        Self {
            success: true,
            status: started.status,
            message: CODE_SENT_MESSAGE.to_string(),
        }
    }
}

/// Error envelope. Start errors carry only `message`; check errors also
/// carry `success: false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub message: String,
}

// =============================================================================
// Handlers
// =============================================================================

pub async fn start_verification_handler(
    Extension(deps): Extension<ServerDeps>,
    client_ip: Option<Extension<ClientIp>>,
    payload: Result<Json<StartVerificationRequest>, JsonRejection>,
) -> Response {
    match start(&deps, payload).await {
        Ok(started) => Json(StartVerificationResponse {
            success: true,
            message: CODE_SENT_MESSAGE.to_string(),
            status: started.status,
        })
        .into_response(),
        Err(err) => error_response(err, None, client_ip),
    }
}

pub async fn check_verification_handler(
    Extension(deps): Extension<ServerDeps>,
    client_ip: Option<Extension<ClientIp>>,
    payload: Result<Json<CheckVerificationRequest>, JsonRejection>,
) -> Response {
    match check(&deps, payload, CheckMode::SendWhenCodeMissing).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(err, Some(false), client_ip),
    }
}

pub async fn confirm_verification_handler(
    Extension(deps): Extension<ServerDeps>,
    client_ip: Option<Extension<ClientIp>>,
    payload: Result<Json<CheckVerificationRequest>, JsonRejection>,
) -> Response {
    match check(&deps, payload, CheckMode::RequireCode).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(err, Some(false), client_ip),
    }
}

// =============================================================================
// Request flow
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckMode {
    SendWhenCodeMissing,
    RequireCode,
}

fn invalid_body(rejection: JsonRejection) -> VerificationError {
    VerificationError::InvalidBody(rejection.body_text())
}

// Configuration is checked before the body so a misconfigured server
// answers 500 to every request.

async fn start(
    deps: &ServerDeps,
    payload: Result<Json<StartVerificationRequest>, JsonRejection>,
) -> Result<VerificationStarted, VerificationError> {
    let verifier = require_verifier(deps)?;
    let Json(request) = payload.map_err(invalid_body)?;

    actions::start_verification(
        verifier,
        request.phone.as_deref(),
        request.channel.unwrap_or_default(),
        request.custom_code.as_deref(),
    )
    .await
}

async fn check(
    deps: &ServerDeps,
    payload: Result<Json<CheckVerificationRequest>, JsonRejection>,
    mode: CheckMode,
) -> Result<CheckVerificationResponse, VerificationError> {
    let verifier = require_verifier(deps)?;
    let Json(request) = payload.map_err(invalid_body)?;
    let (phone, code) = request.resolve()?;

    match (code, mode) {
        (Some(code), _) => {
            let outcome = actions::check_verification(verifier, Some(&phone), &code).await?;
            Ok(outcome.into())
        }
        (None, CheckMode::RequireCode) => Err(VerificationError::MissingCode),
        (None, CheckMode::SendWhenCodeMissing) => {
            warn!("check-verification called without a code, sending a new one; use start-verification");
            let started =
                actions::start_verification(verifier, Some(&phone), Channel::Sms, None).await?;
            Ok(started.into())
        }
    }
}

fn error_response(
    err: VerificationError,
    success: Option<bool>,
    client_ip: Option<Extension<ClientIp>>,
) -> Response {
    let client_ip = client_ip.map(|Extension(ClientIp(ip))| ip);

    match &err {
        VerificationError::Configuration => {
            error!(?client_ip, "Twilio environment variables are not set.")
        }
        // Already logged by the action with the provider error
        VerificationError::Provider { .. } => {}
        other => debug!(?client_ip, reason = %other, "Rejected verification request"),
    }

    (
        err.status_code(),
        Json(ErrorResponse {
            success,
            message: err.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        phone: Option<&str>,
        code: Option<&str>,
        phone_number: Option<&str>,
        text_message: Option<&str>,
    ) -> CheckVerificationRequest {
        CheckVerificationRequest {
            phone: phone.map(str::to_string),
            code: code.map(str::to_string),
            phone_number: phone_number.map(str::to_string),
            text_message: text_message.map(str::to_string),
        }
    }

    #[test]
    fn test_resolve_plain_payload() {
        let (phone, code) = request(Some("+15555550100"), Some("123456"), None, None)
            .resolve()
            .unwrap();
        assert_eq!(phone, "+15555550100");
        assert_eq!(code.as_deref(), Some("123456"));
    }

    #[test]
    fn test_resolve_empty_code_is_absent() {
        let (_, code) = request(Some("+15555550100"), Some(""), None, None)
            .resolve()
            .unwrap();
        assert_eq!(code, None);
    }

    #[test]
    fn test_resolve_text_message_payload() {
        let (phone, code) = request(
            None,
            None,
            Some("+15555550100"),
            Some("Your code is 987654"),
        )
        .resolve()
        .unwrap();
        assert_eq!(phone, "+15555550100");
        assert_eq!(code.as_deref(), Some("987654"));
    }

    #[test]
    fn test_resolve_text_message_without_code() {
        let err = request(None, None, Some("+15555550100"), Some("hello"))
            .resolve()
            .unwrap_err();
        assert!(matches!(err, VerificationError::CodeNotFound));
    }

    #[test]
    fn test_resolve_missing_phone() {
        let err = request(Some(""), Some("123456"), None, None)
            .resolve()
            .unwrap_err();
        assert!(matches!(err, VerificationError::MissingPhone));
    }

    #[test]
    fn test_request_field_names() {
        let parsed: CheckVerificationRequest = serde_json::from_str(
            r#"{"phoneNumber":"+15555550100","textMessage":"code 111222"}"#,
        )
        .unwrap();
        assert_eq!(parsed.phone_number.as_deref(), Some("+15555550100"));

        let parsed: StartVerificationRequest =
            serde_json::from_str(r#"{"phone":"5555550100","channel":"call","customCode":"1234"}"#)
                .unwrap();
        assert_eq!(parsed.channel, Some(Channel::Call));
        assert_eq!(parsed.custom_code.as_deref(), Some("1234"));
    }

    #[test]
    fn test_start_error_envelope_omits_success() {
        let body = serde_json::to_value(ErrorResponse {
            success: None,
            message: "Phone number is required.".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"message": "Phone number is required."}));
    }
}
