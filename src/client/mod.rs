//! Client layer: issues one gateway request per recipient and collects the outcomes.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::config::GatewayConfig;
use crate::domain::{OutboundMessage, PhoneNumber};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Completed HTTP exchange with the gateway.
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

pub(crate) trait HttpTransport: Send + Sync {
    fn get<'a>(
        &'a self,
        url: Url,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn get<'a>(
        &'a self,
        url: Url,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            // reqwest errors carry the request URL, which holds the account password.
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(reqwest::Error::without_url)?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(reqwest::Error::without_url)?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`GatewayClient`].
pub enum GatewayError {
    /// HTTP client / transport failure (DNS, TLS, refused connection, timeouts).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),
}

#[derive(Debug)]
/// Result of sending the message to one recipient.
pub struct SendOutcome {
    pub phone: PhoneNumber,
    pub result: Result<HttpResponse, GatewayError>,
}

impl SendOutcome {
    pub fn is_sent(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Clone)]
/// Builder for [`GatewayClient`].
pub struct GatewayClientBuilder {
    config: GatewayConfig,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl GatewayClientBuilder {
    /// Create a builder with no timeout/user-agent override.
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            timeout: None,
            user_agent: None,
        }
    }

    /// Set an HTTP client timeout applied to every request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`GatewayClient`].
    pub fn build(self) -> Result<GatewayClient, GatewayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| GatewayError::Transport(Box::new(err)))?;

        Ok(GatewayClient {
            config: Arc::new(self.config),
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// HTTP GET client for the SMS gateway.
///
/// Every recipient gets its own request; the response body is not interpreted.
pub struct GatewayClient {
    config: Arc<GatewayConfig>,
    http: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient")
            .field("host", &self.config.host.as_str())
            .finish_non_exhaustive()
    }
}

impl GatewayClient {
    /// Create a client without timeout.
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config: Arc::new(config),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(config: GatewayConfig) -> GatewayClientBuilder {
        GatewayClientBuilder::new(config)
    }

    pub(crate) fn with_transport(config: GatewayConfig, http: Arc<dyn HttpTransport>) -> Self {
        Self {
            config: Arc::new(config),
            http,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Send `message` to each recipient in order, one request at a time.
    ///
    /// A failed request does not stop the remaining ones. Any completed HTTP exchange
    /// counts as sent, whatever its status code or body.
    pub async fn send(&self, message: &OutboundMessage) -> Vec<SendOutcome> {
        let mut outcomes = Vec::with_capacity(message.recipients().len());

        for phone in message.recipients() {
            let url = crate::transport::send_sms_url(&self.config, phone, message.text());
            let result = self.http.get(url).await.map_err(GatewayError::Transport);

            match &result {
                Ok(response) => tracing::debug!(
                    phone = %phone,
                    status = response.status,
                    body = %response.body,
                    "gateway answered"
                ),
                Err(err) => tracing::warn!(phone = %phone, error = %err, "gateway request failed"),
            }

            outcomes.push(SendOutcome {
                phone: phone.clone(),
                result,
            });
        }

        outcomes
    }
}
