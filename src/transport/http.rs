use crate::config::RelayConfig;
use crate::drivers::DriverRequest;
use crate::Result;
use reqwest::Proxy;
use std::time::Duration;
use tracing::debug;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &RelayConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Some(Duration::from_secs(90)));

        if let Some(proxy_url) = config.proxy_url.as_deref() {
            let proxy = Proxy::all(proxy_url)
                .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST a driver request and read the whole body. Non-2xx statuses are
    /// returned, not turned into errors; the driver decides what they mean.
    pub async fn execute(&self, request: &DriverRequest) -> Result<RawResponse> {
        let url = format!("{}{}", self.base_url, request.path);

        let mut req = self.client.post(&url).json(&request.body);
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }

        // The query string may hold the API key; only the path is logged.
        debug!(path = %request.path, "sending request");

        let response = req
            .send()
            .await
            .map_err(|e| crate::Error::Transport(TransportError::Http(e.without_url())))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| crate::Error::Transport(TransportError::Http(e.without_url())))?;

        debug!(status, bytes = body.len(), "response received");
        Ok(RawResponse { status, body })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
