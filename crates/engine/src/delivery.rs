//! Best-effort multi-transport webhook delivery.
//!
//! Orders and return/exchange requests share one delivery path,
//! parameterized only by destination URL and payload. Transports are tried
//! strictly in order, stopping at the first success; they are never raced,
//! so an authoritative success from an earlier strategy can't be overridden
//! by a later one. Each attempt is wrapped in its own failure boundary: one
//! transport's error can't prevent the next from being tried, and the call as
//! a whole resolves to a `bool` without ever propagating an error outward.
//!
//! The default stack:
//!
//! 1. POST with a JSON content type - the only strategy with a readable
//!    response status, so its 2xx check is authoritative.
//! 2. POST without the JSON header - trades the readable status away to
//!    dodge cross-origin preflight rejection; counted as success whenever
//!    the request itself doesn't error.
//! 3. A fire-and-forget beacon-style send detached from the caller; counted
//!    as success once queued.
//! 4. A last-resort GET with the payload URL-encoded into the query string;
//!    counted as success if the request URL constructs.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::UNCONFIGURED_SENTINEL;

/// Simulated-delivery delay for order submissions with no configured webhook.
pub const ORDER_SIMULATED_DELAY: Duration = Duration::from_millis(1500);
/// Simulated-delivery delay for return/exchange submissions.
pub const REQUEST_SIMULATED_DELAY: Duration = Duration::from_millis(500);

/// A single transport attempt failure.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP request itself failed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("endpoint returned status {0}")]
    Status(reqwest::StatusCode),

    /// The request URL could not be constructed.
    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),
}

/// One delivery strategy. Implementations define their own success signal -
/// an authoritative status check, an opaque fire-and-forget, or mere
/// queueing.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Attempt to deliver `body` to `url`.
    async fn send(&self, url: &str, body: &str) -> Result<(), TransportError>;
}

/// POST with `Content-Type: application/json`; success requires a 2xx status.
struct JsonPost {
    client: reqwest::Client,
}

#[async_trait]
impl Transport for JsonPost {
    fn name(&self) -> &'static str {
        "json-post"
    }

    async fn send(&self, url: &str, body: &str) -> Result<(), TransportError> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_owned())
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(TransportError::Status(status))
        }
    }
}

/// POST without the JSON header. The response is treated as opaque: any
/// completed request counts as delivered, whatever the status.
struct PlainPost {
    client: reqwest::Client,
}

#[async_trait]
impl Transport for PlainPost {
    fn name(&self) -> &'static str {
        "plain-post"
    }

    async fn send(&self, url: &str, body: &str) -> Result<(), TransportError> {
        self.client.post(url).body(body.to_owned()).send().await?;
        Ok(())
    }
}

/// Fire-and-forget send detached from the caller, surviving whatever the
/// caller does next. Success means the send was queued; the outcome is
/// unobservable by design.
struct Beacon {
    client: reqwest::Client,
}

#[async_trait]
impl Transport for Beacon {
    fn name(&self) -> &'static str {
        "beacon"
    }

    async fn send(&self, url: &str, body: &str) -> Result<(), TransportError> {
        let client = self.client.clone();
        let url = url.to_owned();
        let body = body.to_owned();
        tokio::spawn(async move {
            if let Err(e) = client
                .post(&url)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await
            {
                debug!(error = %e, "beacon send failed after queueing");
            }
        });
        Ok(())
    }
}

/// Last resort: GET with the whole payload URL-encoded into the query string.
/// Success only requires the URL to construct; the send itself is detached
/// best-effort.
struct QueryGet {
    client: reqwest::Client,
}

#[async_trait]
impl Transport for QueryGet {
    fn name(&self) -> &'static str {
        "query-get"
    }

    async fn send(&self, url: &str, body: &str) -> Result<(), TransportError> {
        let full = format!("{url}?payload={}", urlencoding::encode(body));
        let parsed = url::Url::parse(&full)?;
        let client = self.client.clone();
        tokio::spawn(async move {
            if let Err(e) = client.get(parsed).send().await {
                debug!(error = %e, "query-string GET failed after dispatch");
            }
        });
        Ok(())
    }
}

/// The ordered delivery pipeline.
pub struct Dispatcher {
    transports: Vec<Box<dyn Transport>>,
}

impl Dispatcher {
    /// Build the default four-transport stack over a shared HTTP client.
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            transports: vec![
                Box::new(JsonPost {
                    client: client.clone(),
                }),
                Box::new(PlainPost {
                    client: client.clone(),
                }),
                Box::new(Beacon {
                    client: client.clone(),
                }),
                Box::new(QueryGet { client }),
            ],
        }
    }

    /// Build a dispatcher over an explicit transport stack. Used by tests to
    /// script transport outcomes.
    #[must_use]
    pub fn with_transports(transports: Vec<Box<dyn Transport>>) -> Self {
        Self { transports }
    }

    /// Deliver `payload` to `url`, trying transports in order.
    ///
    /// An unset, blank, or placeholder URL short-circuits: the call sleeps
    /// `offline_delay` and reports success without any network traffic - a
    /// local-development affordance, not a delivery guarantee.
    ///
    /// Never returns an error: transport failures are logged and the next
    /// strategy is tried; only exhausting all of them yields `false`.
    pub async fn deliver<T: serde::Serialize>(
        &self,
        url: Option<&str>,
        payload: &T,
        offline_delay: Duration,
    ) -> bool {
        let body = match serde_json::to_string(payload) {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Failed to serialize delivery payload");
                return false;
            }
        };

        let url = url.map(str::trim).filter(|u| !u.is_empty());
        let Some(url) = url.filter(|u| *u != UNCONFIGURED_SENTINEL) else {
            warn!("Webhook URL not configured; simulating delivery");
            tokio::time::sleep(offline_delay).await;
            return true;
        };

        for transport in &self.transports {
            match transport.send(url, &body).await {
                Ok(()) => {
                    debug!(transport = transport.name(), "Delivery succeeded");
                    return true;
                }
                Err(e) => {
                    warn!(
                        transport = transport.name(),
                        error = %e,
                        "Delivery transport failed; trying next"
                    );
                }
            }
        }

        false
    }
}
