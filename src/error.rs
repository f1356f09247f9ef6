use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "config.timeout_secs", "request.prompt")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "config_loader", "keyring")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for prompt improvement.
///
/// The first three variants are the terminal outcomes of a relay call; the
/// rest cover input validation, settings storage and configuration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("API key is not set")]
    MissingCredential,

    #[error("API call error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    #[error("Suggestion list is empty or the response could not be parsed")]
    EmptyOrUnparsable { raw_response: String },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Credential store error: {message}{}", format_context(.context))]
    CredentialStore {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// API failure without an HTTP status (e.g. a blocked or malformed response).
    pub fn api(message: impl Into<String>) -> Self {
        Error::Api {
            message: message.into(),
            status: None,
        }
    }

    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    pub fn credential_store_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::CredentialStore {
            message: msg.into(),
            context,
        }
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Validation { context, .. }
            | Error::CredentialStore { context, .. }
            | Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Stable, machine-readable tag surfaced to callers as `errorKind`.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MissingCredential => "missing_credential",
            // Transport failures are API failures from the caller's point of view.
            Error::Api { .. } | Error::Transport(_) => "api_error",
            Error::EmptyOrUnparsable { .. } => "empty_or_unparsable",
            Error::Validation { .. } => "invalid_request",
            Error::CredentialStore { .. } => "credential_store",
            Error::Configuration { .. } => "configuration",
            Error::Io(_) => "io",
            Error::Serialization(_) => "serialization",
        }
    }

    /// Raw model output attached to parse failures, for diagnostics.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::EmptyOrUnparsable { raw_response } => Some(raw_response),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_is_rendered_in_display() {
        let err = Error::configuration_with_context(
            "invalid timeout",
            ErrorContext::new()
                .with_field_path("timeout_secs")
                .with_source("config_loader"),
        );
        assert_eq!(
            err.to_string(),
            "Configuration error: invalid timeout (field: timeout_secs, source: config_loader)"
        );
        assert_eq!(err.context().unwrap().field_path.as_deref(), Some("timeout_secs"));
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(Error::MissingCredential.kind(), "missing_credential");
        assert_eq!(Error::api("boom").kind(), "api_error");
        let err = Error::EmptyOrUnparsable {
            raw_response: "  ".into(),
        };
        assert_eq!(err.kind(), "empty_or_unparsable");
        assert_eq!(err.raw_response(), Some("  "));
        assert!(Error::MissingCredential.raw_response().is_none());
    }
}
