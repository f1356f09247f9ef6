//! Relay configuration.
//!
//! Values come from built-in defaults, then an optional YAML file, then
//! `PROMPT_IMPROVER_*` environment variables.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::drivers::GenerationParams;
use crate::error::{Error, ErrorContext};
use crate::relay::TemplateLanguage;
use crate::Result;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelayConfig {
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    pub language: TemplateLanguage,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            proxy_url: None,
            temperature: None,
            max_output_tokens: None,
            language: TemplateLanguage::default(),
        }
    }
}

impl RelayConfig {
    /// Defaults, then `path` if given, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.with_env_overrides(|name| env::var(name).ok())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text).map_err(|e| match e {
            Error::Configuration { message, context } => Error::Configuration {
                message,
                context: context.with_source(path.display().to_string()),
            },
            other => other,
        })
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text).map_err(|e| {
            Error::configuration_with_context(
                "invalid configuration file",
                ErrorContext::new().with_details(e.to_string()),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `PROMPT_IMPROVER_*` overrides read through `lookup`.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PROMPT_IMPROVER_MODEL") {
            self.model = v;
        }
        if let Some(v) = lookup("PROMPT_IMPROVER_BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = lookup("PROMPT_IMPROVER_TIMEOUT_SECS") {
            self.timeout_secs = v.trim().parse::<u64>().map_err(|_| {
                Error::configuration_with_context(
                    "timeout must be a whole number of seconds",
                    ErrorContext::new()
                        .with_field_path("PROMPT_IMPROVER_TIMEOUT_SECS")
                        .with_details(v.clone()),
                )
            })?;
        }
        if let Some(v) = lookup("PROMPT_IMPROVER_PROXY_URL") {
            self.proxy_url = Some(v).filter(|s| !s.trim().is_empty());
        }
        if let Some(v) = lookup("PROMPT_IMPROVER_LANGUAGE") {
            self.language = v.parse()?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(invalid("model", "model must not be empty"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(invalid("base_url", "base_url must be an http(s) URL"));
        }
        if self.timeout_secs == 0 {
            return Err(invalid("timeout_secs", "timeout_secs must be greater than zero"));
        }
        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(invalid("temperature", "temperature must be between 0 and 2"));
            }
        }
        Ok(())
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

fn invalid(field: &str, msg: &str) -> Error {
    Error::configuration_with_context(msg, ErrorContext::new().with_field_path(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RelayConfig::default();
        assert_eq!(config.model, "gemini-1.5-flash-latest");
        assert_eq!(config.language, TemplateLanguage::English);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = RelayConfig::from_yaml("model: gemini-2.0-flash\nlanguage: japanese\n").unwrap();
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.language, TemplateLanguage::Japanese);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_yaml_accepts_short_language_codes() {
        let config = RelayConfig::from_yaml("language: ja\n").unwrap();
        assert_eq!(config.language, TemplateLanguage::Japanese);
        let config = RelayConfig::from_yaml("language: en\n").unwrap();
        assert_eq!(config.language, TemplateLanguage::English);
    }

    #[test]
    fn test_unknown_yaml_field_rejected() {
        let err = RelayConfig::from_yaml("modle: typo\n").unwrap_err();
        assert_eq!(err.kind(), "configuration");
    }

    #[test]
    fn test_env_overrides() {
        let config = RelayConfig::default()
            .with_env_overrides(lookup(&[
                ("PROMPT_IMPROVER_MODEL", "gemini-pro"),
                ("PROMPT_IMPROVER_TIMEOUT_SECS", "5"),
                ("PROMPT_IMPROVER_LANGUAGE", "ja"),
            ]))
            .unwrap();
        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.language, TemplateLanguage::Japanese);
    }

    #[test]
    fn test_invalid_env_values() {
        let err = RelayConfig::default()
            .with_env_overrides(lookup(&[("PROMPT_IMPROVER_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert_eq!(
            err.context().unwrap().field_path.as_deref(),
            Some("PROMPT_IMPROVER_TIMEOUT_SECS")
        );

        assert!(RelayConfig::default()
            .with_env_overrides(lookup(&[("PROMPT_IMPROVER_BASE_URL", "ftp://x")]))
            .is_err());
    }

    #[test]
    fn test_out_of_range_temperature() {
        assert!(RelayConfig::from_yaml("temperature: 3.5\n").is_err());
    }
}
