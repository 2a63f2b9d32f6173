// Twilio Verify v2 client: start a verification and check a submitted code.
// https://www.twilio.com/docs/verify/api

pub mod error;
pub mod models;

use std::time::Duration;

use reqwest::{Client, Response};

pub use crate::error::TwilioError;
pub use crate::models::{Channel, TwilioErrorBody, Verification, VerificationCheck};

pub const DEFAULT_BASE_URL: &str = "https://verify.twilio.com/v2";

/// Upper bound on a single Verify API call, connect through body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct TwilioOptions {
    pub account_sid: String,
    pub auth_token: String,
    pub service_id: String,
}

#[derive(Debug, Clone)]
pub struct TwilioService {
    options: TwilioOptions,
    base_url: String,
    client: Client,
}

impl TwilioService {
    pub fn new(options: TwilioOptions) -> Result<Self, TwilioError> {
        Ok(Self {
            options,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: build_client(DEFAULT_TIMEOUT)?,
        })
    }

    /// Replace the default request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, TwilioError> {
        self.client = build_client(timeout)?;
        Ok(self)
    }

    /// Point the client at a different Verify host (mock servers in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Ask Twilio to deliver a one-time code to `to`.
    ///
    /// `custom_code` is forwarded as `CustomCode` when present; Twilio only
    /// accepts it on services with custom codes enabled.
    pub async fn start_verification(
        &self,
        to: &str,
        channel: Channel,
        custom_code: Option<&str>,
    ) -> Result<Verification, TwilioError> {
        let url = format!(
            "{base}/Services/{serv_id}/Verifications",
            base = self.base_url,
            serv_id = self.options.service_id
        );

        let mut form_body: Vec<(&str, &str)> = vec![("To", to), ("Channel", channel.as_str())];
        if let Some(code) = custom_code {
            form_body.push(("CustomCode", code));
        }

        let response = self.post_form(&url, &form_body).await?;
        let verification: Verification = parse_response(response).await?;

        tracing::debug!(
            sid = %verification.sid,
            status = %verification.status,
            channel = %channel,
            "Twilio verification started"
        );
        Ok(verification)
    }

    /// Check `code` against the pending verification for `to`.
    ///
    /// Any status other than `approved` is returned as-is; only transport
    /// and API failures are errors.
    pub async fn check_verification(
        &self,
        to: &str,
        code: &str,
    ) -> Result<VerificationCheck, TwilioError> {
        let url = format!(
            "{base}/Services/{serv_id}/VerificationCheck",
            base = self.base_url,
            serv_id = self.options.service_id
        );

        let form_body = [("To", to), ("Code", code)];

        let response = self.post_form(&url, &form_body).await?;
        let check: VerificationCheck = parse_response(response).await?;

        tracing::debug!(
            sid = %check.sid,
            status = %check.status,
            "Twilio verification checked"
        );
        Ok(check)
    }

    async fn post_form(&self, url: &str, form_body: &[(&str, &str)]) -> Result<Response, TwilioError> {
        self.client
            .post(url)
            .basic_auth(&self.options.account_sid, Some(&self.options.auth_token))
            .form(form_body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    timeout = e.is_timeout(),
                    "Request to Twilio failed"
                );
                TwilioError::Request(e)
            })
    }
}

fn build_client(timeout: Duration) -> Result<Client, TwilioError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(TwilioError::Request)
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: Response,
) -> Result<T, TwilioError> {
    let status = response.status();
    let body = response.text().await.map_err(TwilioError::Request)?;

    if !status.is_success() {
        // The body can quote the `To` number; keep it out of the logs
        let err = TwilioError::from_error_body(status.as_u16(), &body);
        tracing::error!(status = %status, code = ?err.code(), "Twilio returned an error");
        return Err(err);
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::error!(error = %e, "Failed to parse Twilio response");
        TwilioError::Decode(e)
    })
}
