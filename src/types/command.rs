//! Inbound messages from the UI collaborator.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, ErrorContext};
use crate::Result;

/// Action name carried by an improve request.
pub const IMPROVE_PROMPT_ACTION: &str = "improvePrompt";

/// A prompt to be reworded. Always holds trimmed, non-empty text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImprovementRequest {
    prompt: String,
}

impl ImprovementRequest {
    /// Validate and trim a user prompt.
    pub fn new(prompt: impl AsRef<str>) -> Result<Self> {
        let trimmed = prompt.as_ref().trim();
        if trimmed.is_empty() {
            return Err(Error::validation_with_context(
                "prompt must not be empty",
                ErrorContext::new().with_field_path("request.prompt"),
            ));
        }
        Ok(Self {
            prompt: trimmed.to_string(),
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// A message received on the relay's inbound channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundCommand {
    /// `{ "action": "improvePrompt", "prompt": "..." }`. The prompt is kept
    /// as sent; validation happens in the relay so that it can be reported
    /// back as a failure result.
    ImprovePrompt { prompt: String },
    /// Anything else. These are ignored and never answered.
    Unknown { action: Option<String> },
}

impl InboundCommand {
    pub fn from_value(value: &Value) -> Self {
        let action = value.get("action").and_then(Value::as_str);
        match (action, value.get("prompt").and_then(Value::as_str)) {
            (Some(IMPROVE_PROMPT_ACTION), Some(prompt)) => InboundCommand::ImprovePrompt {
                prompt: prompt.to_string(),
            },
            _ => InboundCommand::Unknown {
                action: action.map(String::from),
            },
        }
    }

    /// Parse one line of newline-delimited JSON.
    pub fn parse_line(line: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(line)?;
        Ok(Self::from_value(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_trims_prompt() {
        let req = ImprovementRequest::new("  write a haiku \n").unwrap();
        assert_eq!(req.prompt(), "write a haiku");
    }

    #[test]
    fn test_request_rejects_blank_prompt() {
        let err = ImprovementRequest::new(" \t\n").unwrap_err();
        assert_eq!(err.kind(), "invalid_request");
    }

    #[test]
    fn test_improve_prompt_command() {
        let cmd = InboundCommand::from_value(&json!({"action": "improvePrompt", "prompt": "hi"}));
        assert_eq!(
            cmd,
            InboundCommand::ImprovePrompt {
                prompt: "hi".into()
            }
        );
    }

    #[test]
    fn test_unknown_and_malformed_commands() {
        let cmd = InboundCommand::from_value(&json!({"action": "ping"}));
        assert_eq!(
            cmd,
            InboundCommand::Unknown {
                action: Some("ping".into())
            }
        );

        // improvePrompt without a string prompt is not a valid command
        let cmd = InboundCommand::from_value(&json!({"action": "improvePrompt", "prompt": 3}));
        assert!(matches!(cmd, InboundCommand::Unknown { .. }));

        let cmd = InboundCommand::from_value(&json!(null));
        assert_eq!(cmd, InboundCommand::Unknown { action: None });
    }

    #[test]
    fn test_parse_line_rejects_invalid_json() {
        assert!(InboundCommand::parse_line("{not json").is_err());
    }
}
