use std::sync::Arc;

use crate::client::core::GenerationClient;
use crate::config::RelayConfig;
use crate::drivers::{GeminiDriver, ProviderDriver};
use crate::transport::HttpTransport;
use crate::Result;

/// Builder for [`GenerationClient`].
pub struct GenerationClientBuilder {
    config: RelayConfig,
    /// Override base URL (primarily for testing with mock servers)
    base_url_override: Option<String>,
}

impl GenerationClientBuilder {
    pub fn new() -> Self {
        Self {
            config: RelayConfig::default(),
            base_url_override: None,
        }
    }

    pub fn config(mut self, config: RelayConfig) -> Self {
        self.config = config;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Override the configured base URL.
    ///
    /// This is primarily for testing with mock servers.
    pub fn base_url_override(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    pub fn build(self) -> Result<GenerationClient> {
        let mut config = self.config;
        if let Some(url) = self.base_url_override {
            config.base_url = url;
        }
        config.validate()?;

        let transport = Arc::new(HttpTransport::new(&config)?);
        let driver: Arc<dyn ProviderDriver> = Arc::new(GeminiDriver::new());

        Ok(GenerationClient {
            driver,
            transport,
            params: config.generation_params(),
            model: config.model,
        })
    }
}

impl Default for GenerationClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
