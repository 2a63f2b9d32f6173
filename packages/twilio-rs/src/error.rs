use thiserror::Error;

use crate::models::TwilioErrorBody;

#[derive(Error, Debug)]
pub enum TwilioError {
    #[error("Error sending request to Twilio: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx response. `code` is Twilio's numeric error code when the body
    /// carried one (e.g. 60200 invalid parameter, 20404 not found).
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<u32>,
        message: String,
    },

    #[error("Error parsing Twilio response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl TwilioError {
    pub(crate) fn from_error_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<TwilioErrorBody>(body) {
            Ok(parsed) => TwilioError::Api {
                status,
                code: parsed.code,
                message: parsed.message,
            },
            Err(_) => TwilioError::Api {
                status,
                code: None,
                message: if body.trim().is_empty() {
                    format!("Twilio returned HTTP {}", status)
                } else {
                    body.trim().to_string()
                },
            },
        }
    }

    /// Twilio's numeric error code, when the error body carried one.
    pub fn code(&self) -> Option<u32> {
        match self {
            TwilioError::Api { code, .. } => *code,
            _ => None,
        }
    }

    /// HTTP status Twilio answered with, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            TwilioError::Api { status, .. } => Some(*status),
            TwilioError::Request(e) => e.status().map(|s| s.as_u16()),
            TwilioError::Decode(_) => None,
        }
    }
}
