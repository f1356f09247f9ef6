//! Provider driver abstraction.
//!
//! A driver turns an instruction into a provider-specific HTTP request and
//! extracts plain text from the provider's response. HTTP itself is handled
//! by [`crate::transport::HttpTransport`].

pub mod gemini;

use serde_json::Value;

use crate::error::Error;

pub use gemini::GeminiDriver;

/// Provider-specific HTTP request, always sent as a JSON POST.
#[derive(Debug, Clone)]
pub struct DriverRequest {
    /// Path relative to the configured base URL.
    pub path: String,
    /// Query parameters, including authentication where the provider wants it there.
    pub query: Vec<(String, String)>,
    /// Serialized JSON request body.
    pub body: Value,
}

/// Generated text extracted from a provider response.
#[derive(Debug, Clone)]
pub struct DriverResponse {
    /// Concatenated text output. May be empty.
    pub text: String,
    /// Finish reason as reported by the provider.
    pub finish_reason: Option<String>,
    /// Token usage statistics.
    pub usage: Option<UsageInfo>,
}

/// Token usage information.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageInfo {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Sampling parameters passed through to the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationParams {
    pub temperature: Option<f64>,
    pub max_output_tokens: Option<u32>,
}

/// Provider-specific request/response adaptation.
pub trait ProviderDriver: Send + Sync + std::fmt::Debug {
    /// Unique provider identifier.
    fn provider_id(&self) -> &str;

    /// Build a single-turn text generation request.
    fn build_request(
        &self,
        instruction: &str,
        model: &str,
        api_key: &str,
        params: GenerationParams,
    ) -> Result<DriverRequest, Error>;

    /// Parse a successful (2xx) response body.
    fn parse_response(&self, body: &Value) -> Result<DriverResponse, Error>;

    /// Map a non-2xx response into an API error.
    fn parse_error(&self, status: u16, body: &str) -> Error;
}
