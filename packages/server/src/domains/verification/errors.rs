use axum::http::StatusCode;
use thiserror::Error;

use super::phone::PhoneError;

/// Every way a verification request can fail.
///
/// Configuration and provider failures are server errors; the rest are
/// caller mistakes.
#[derive(Error, Debug)]
pub enum VerificationError {
    #[error("Server configuration error: Twilio credentials missing.")]
    Configuration,

    #[error("Phone number is required.")]
    MissingPhone,

    #[error("Invalid phone number format. Please use E.164 format (e.g., +1234567890).")]
    InvalidPhone(#[from] PhoneError),

    #[error("Phone number and code are required.")]
    MissingCode,

    #[error("No 6-digit verification code found in text message.")]
    CodeNotFound,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// `operation` is `start` or `check`.
    #[error("Failed to {operation} verification: {message}")]
    Provider {
        operation: &'static str,
        message: String,
    },
}

impl VerificationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            VerificationError::Configuration | VerificationError::Provider { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            VerificationError::MissingPhone
            | VerificationError::InvalidPhone(_)
            | VerificationError::MissingCode
            | VerificationError::CodeNotFound
            | VerificationError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}
