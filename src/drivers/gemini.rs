//! Google Gemini generateContent API driver.
//!
//! - Request: `contents[].parts[].text`, sampling under `generationConfig`.
//! - Response: text lives in `candidates[0].content.parts[*].text`.
//! - API key is passed as the `key` query parameter, not in headers.
//! - Errors: `{ "error": { "code", "message", "status" } }`.

use serde_json::{json, Value};

use crate::error::Error;

use super::{DriverRequest, DriverResponse, GenerationParams, ProviderDriver, UsageInfo};

/// Finish reasons that mean the candidate was withheld.
const BLOCKING_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "RECITATION",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
    "OTHER",
];

#[derive(Debug)]
pub struct GeminiDriver {
    provider_id: String,
}

impl GeminiDriver {
    pub fn new() -> Self {
        Self {
            provider_id: "google".to_string(),
        }
    }

    fn collect_text(candidate: &Value) -> String {
        candidate
            .pointer("/content/parts")
            .and_then(Value::as_array)
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|p| p.get("text").and_then(Value::as_str))
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

impl Default for GeminiDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderDriver for GeminiDriver {
    fn provider_id(&self) -> &str {
        &self.provider_id
    }

    fn build_request(
        &self,
        instruction: &str,
        model: &str,
        api_key: &str,
        params: GenerationParams,
    ) -> Result<DriverRequest, Error> {
        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": instruction }],
            }],
        });

        let mut gen_config = json!({});
        if let Some(t) = params.temperature {
            gen_config["temperature"] = json!(t);
        }
        if let Some(mt) = params.max_output_tokens {
            gen_config["maxOutputTokens"] = json!(mt);
        }
        if gen_config != json!({}) {
            body["generationConfig"] = gen_config;
        }

        Ok(DriverRequest {
            path: format!("/v1beta/models/{}:generateContent", model),
            query: vec![("key".to_string(), api_key.to_string())],
            body,
        })
    }

    fn parse_response(&self, body: &Value) -> Result<DriverResponse, Error> {
        let candidate = body.pointer("/candidates/0");

        let Some(candidate) = candidate else {
            let reason = body
                .pointer("/promptFeedback/blockReason")
                .and_then(Value::as_str);
            return match reason {
                Some(reason) => Err(Error::api(format!("prompt was blocked: {}", reason))),
                // A reply without candidates carries no text at all.
                None => Ok(DriverResponse {
                    text: String::new(),
                    finish_reason: None,
                    usage: None,
                }),
            };
        };

        let text = Self::collect_text(candidate);
        let finish_reason = candidate
            .get("finishReason")
            .and_then(Value::as_str)
            .map(String::from);

        if text.is_empty() {
            if let Some(reason) = finish_reason
                .as_deref()
                .filter(|r| BLOCKING_FINISH_REASONS.contains(r))
            {
                return Err(Error::api(format!("response was blocked: {}", reason)));
            }
        }

        let usage = body.get("usageMetadata").map(|u| UsageInfo {
            prompt_tokens: u["promptTokenCount"].as_u64().unwrap_or(0),
            completion_tokens: u["candidatesTokenCount"].as_u64().unwrap_or(0),
            total_tokens: u["totalTokenCount"].as_u64().unwrap_or(0),
        });

        Ok(DriverResponse {
            text,
            finish_reason,
            usage,
        })
    }

    fn parse_error(&self, status: u16, body: &str) -> Error {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| {
                v.pointer("/error/message")
                    .and_then(Value::as_str)
                    .map(String::from)
            })
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("HTTP {}", status)
                } else {
                    format!("HTTP {}: {}", status, body.trim())
                }
            });
        Error::Api {
            message,
            status: Some(status),
        }
    }
}
