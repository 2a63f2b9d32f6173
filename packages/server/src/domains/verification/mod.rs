//! Verification domain - phone number verification via Twilio Verify
//!
//! Responsibilities:
//! - E.164 normalization of loosely formatted phone input
//! - Starting a verification (provider sends an SMS code)
//! - Checking a submitted code and interpreting the provider status
//!
//! All OTP state (codes, expiry, attempt limits) lives in the provider.

pub mod actions;
pub mod errors;
pub mod phone;
pub mod types;

pub use errors::VerificationError;
pub use phone::{extract_code, hash_phone_number, normalize_phone, PhoneError};
pub use types::{VerificationOutcome, VerificationStarted};
