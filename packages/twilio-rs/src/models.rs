use std::fmt;

use serde::{Deserialize, Serialize};

/// Delivery channel for the one-time code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    #[default]
    Sms,
    Call,
    Whatsapp,
    Email,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Sms => "sms",
            Channel::Call => "call",
            Channel::Whatsapp => "whatsapp",
            Channel::Email => "email",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response to `POST /Services/{sid}/Verifications`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verification {
    pub sid: String,
    #[serde(default)]
    pub service_sid: Option<String>,
    pub to: String,
    pub channel: String,
    /// `pending`, `approved` or `canceled`.
    pub status: String,
    #[serde(default)]
    pub valid: bool,
}

impl Verification {
    pub fn is_approved(&self) -> bool {
        self.status == "approved"
    }
}

/// Response to `POST /Services/{sid}/VerificationCheck`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationCheck {
    pub sid: String,
    #[serde(default)]
    pub service_sid: Option<String>,
    pub to: String,
    #[serde(default)]
    pub channel: Option<String>,
    pub status: String,
    #[serde(default)]
    pub valid: bool,
}

impl VerificationCheck {
    pub fn is_approved(&self) -> bool {
        self.status == "approved"
    }
}

/// Error envelope Twilio returns with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct TwilioErrorBody {
    #[serde(default)]
    pub code: Option<u32>,
    pub message: String,
    #[serde(default)]
    pub more_info: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
}
