//! HTTP ticket renderer adapter.
//!
//! Delegates PDF and QR generation to an external rendering service.
//! The service is asked to write the document at the path derived from
//! the ticket number, so the reference is stable across retries.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::domain::event::Event;
use crate::domain::ticket::{ArtifactRef, Ticket};
use crate::domain::user::UserProfile;
use crate::ports::{RenderError, TicketRenderer};

/// QR payload discriminator understood by door scanners.
pub const QR_PAYLOAD_TYPE: &str = "gatherup_ticket";

#[derive(Clone)]
pub struct HttpRendererConfig {
    base_url: String,
    api_key: Option<SecretString>,
    artifact_base_path: String,
    timeout: Duration,
}

impl HttpRendererConfig {
    pub fn new(base_url: impl Into<String>, artifact_base_path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            artifact_base_path: artifact_base_path.into(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }
}

#[derive(Debug, Serialize)]
struct QrPayload<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    ticket_number: &'a str,
    token: &'a str,
    event_id: String,
    user_id: &'a str,
}

#[derive(Debug, Serialize)]
struct RenderRequest<'a> {
    output_path: &'a str,
    ticket_number: &'a str,
    status: &'static str,
    event_name: &'a str,
    event_location: &'a str,
    event_starts_at: String,
    holder_name: &'a str,
    holder_email: &'a str,
    price_cents: Option<i64>,
    qr: QrPayload<'a>,
}

pub struct HttpTicketRenderer {
    config: HttpRendererConfig,
    http_client: reqwest::Client,
}

impl HttpTicketRenderer {
    pub fn new(config: HttpRendererConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }
}

#[async_trait]
impl TicketRenderer for HttpTicketRenderer {
    async fn render(
        &self,
        ticket: &Ticket,
        event: &Event,
        holder: &UserProfile,
    ) -> Result<ArtifactRef, RenderError> {
        let artifact =
            ArtifactRef::for_ticket_number(&self.config.artifact_base_path, &ticket.ticket_number);
        let url = format!("{}/render", self.config.base_url.trim_end_matches('/'));

        let body = RenderRequest {
            output_path: artifact.as_str(),
            ticket_number: ticket.ticket_number.as_str(),
            status: ticket.status.as_str(),
            event_name: &event.name,
            event_location: &event.location,
            event_starts_at: event.starts_at.to_rfc3339(),
            holder_name: holder.display_name(),
            holder_email: &holder.email,
            price_cents: event.ticketing.price_cents(),
            qr: QrPayload {
                kind: QR_PAYLOAD_TYPE,
                ticket_number: ticket.ticket_number.as_str(),
                token: ticket.verification_token.as_str(),
                event_id: ticket.event_id.to_string(),
                user_id: ticket.user_id.as_str(),
            },
        };

        let mut request = self.http_client.post(&url).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| RenderError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                error = %error_text,
                ticket_number = %ticket.ticket_number,
                "Ticket render request failed"
            );
            return Err(RenderError::Unavailable(format!(
                "renderer returned {}",
                status
            )));
        }

        Ok(artifact)
    }
}
