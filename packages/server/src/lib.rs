// Phone Verification Bridge - API Core
//
// Thin HTTP bridge between a browser form and Twilio Verify: normalizes
// phone numbers, starts verifications, and checks submitted codes. All OTP
// state lives in Twilio.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
