use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use crate::credentials::Credential;
use crate::drivers::{GenerationParams, ProviderDriver};
use crate::relay::TextGenerator;
use crate::transport::HttpTransport;
use crate::Result;

/// Sends one instruction to a generation API and returns its text.
pub struct GenerationClient {
    pub(crate) driver: Arc<dyn ProviderDriver>,
    pub(crate) transport: Arc<HttpTransport>,
    pub(crate) model: String,
    pub(crate) params: GenerationParams,
}

impl GenerationClient {
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_id(&self) -> &str {
        self.driver.provider_id()
    }
}

#[async_trait]
impl TextGenerator for GenerationClient {
    async fn generate(&self, instruction: &str, credential: &Credential) -> Result<String> {
        let request =
            self.driver
                .build_request(instruction, &self.model, credential.expose(), self.params)?;

        let raw = self.transport.execute(&request).await?;
        if !raw.is_success() {
            return Err(self.driver.parse_error(raw.status, &raw.body));
        }

        let body: serde_json::Value = serde_json::from_str(&raw.body).map_err(|e| {
            crate::Error::api(format!("failed to parse response body: {}", e))
        })?;
        let response = self.driver.parse_response(&body)?;

        if let Some(usage) = &response.usage {
            info!(
                provider = self.driver.provider_id(),
                model = %self.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "generation completed"
            );
        }
        debug!(finish_reason = ?response.finish_reason, chars = response.text.len(), "generation text");
        Ok(response.text)
    }
}
