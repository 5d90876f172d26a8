//! HTTP mail relay email channel.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use serde::Serialize;
use std::time::Duration;

use crate::notifications::EmailSender;
use crate::{Error, Result};

/// Default timeout for outbound relay requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

/// Email sender backed by a transactional mail relay's HTTP API.
///
/// When the relay is not configured the sender is a no-op; failures are
/// reported to the caller, which treats them as best-effort and logs them.
#[derive(Debug, Clone)]
pub struct MailerClient {
    client: reqwest::Client,
    api_url: Option<String>,
    auth_header: Option<HeaderValue>,
}

impl MailerClient {
    pub fn new(api_url: Option<String>, api_key: Option<&str>) -> Result<Self> {
        let auth_header = match api_key {
            Some(key) => Some(
                HeaderValue::from_str(&format!("Bearer {}", key))
                    .map_err(|e| Error::Unexpected(format!("Invalid mail API key: {}", e)))?,
            ),
            None => None,
        };
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_url: api_url.map(|u| u.trim_end_matches('/').to_string()),
            auth_header,
        })
    }
}

#[async_trait]
impl EmailSender for MailerClient {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let Some(api_url) = self.api_url.as_deref() else {
            debug!("Mail relay not configured, dropping email to {}", to);
            return Ok(());
        };

        let request = SendEmailRequest { to, subject, body };
        let mut builder = self.client.post(format!("{}/send", api_url)).json(&request);
        if let Some(auth) = &self.auth_header {
            builder = builder.header(AUTHORIZATION, auth.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Unexpected(format!("Mail relay request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let response_body = response.text().await.unwrap_or_default();
            warn!(
                "Mail relay returned {}: {}",
                status,
                response_body.chars().take(200).collect::<String>()
            );
            return Err(Error::Unexpected(format!(
                "Mail relay returned {}",
                status
            )));
        }
        Ok(())
    }
}
