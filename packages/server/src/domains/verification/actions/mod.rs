//! Verification domain actions - business logic functions
//!
//! Actions are plain async functions called from HTTP handlers. Each does
//! one thing: `start_verification` sends a code, `check_verification`
//! checks one.

mod check_verification;
mod start_verification;

pub use check_verification::check_verification;
pub use start_verification::start_verification;

use crate::domains::verification::errors::VerificationError;
use crate::kernel::{BaseVerificationService, ServerDeps};

/// The configured provider, or a configuration error when credentials
/// were missing at startup.
pub fn require_verifier(deps: &ServerDeps) -> Result<&dyn BaseVerificationService, VerificationError> {
    deps.verifier
        .as_deref()
        .ok_or(VerificationError::Configuration)
}

/// Normalize a required phone field; empty counts as missing.
fn required_phone(phone: Option<&str>) -> Result<String, VerificationError> {
    match phone {
        Some(phone) if !phone.is_empty() => {
            Ok(crate::domains::verification::phone::normalize_phone(phone)?)
        }
        _ => Err(VerificationError::MissingPhone),
    }
}
