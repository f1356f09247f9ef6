//! The relay: wrap a prompt in an instruction, call the generation API,
//! parse the reply into suggestions.
//!
//! One outbound call per accepted invocation, never retried. Validation
//! failures (blank prompt, missing credential) return before any I/O.

pub mod parser;
pub mod template;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::credentials::{Credential, CredentialStore};
use crate::error::Error;
use crate::types::{ImprovementRequest, ImprovementResult};
use crate::Result;

pub use parser::parse_suggestions;
pub use template::{build_instruction, TemplateLanguage, SUGGESTION_COUNT};

/// Anything that can turn an instruction into free text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, instruction: &str, credential: &Credential) -> Result<String>;
}

pub struct Relay {
    generator: Arc<dyn TextGenerator>,
    language: TemplateLanguage,
}

impl Relay {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            language: TemplateLanguage::default(),
        }
    }

    pub fn with_language(mut self, language: TemplateLanguage) -> Self {
        self.language = language;
        self
    }

    pub fn language(&self) -> TemplateLanguage {
        self.language
    }

    /// Improve `prompt` with an already-resolved credential.
    pub async fn improve(
        &self,
        prompt: &str,
        credential: Option<&Credential>,
    ) -> ImprovementResult {
        log_outcome(self.try_improve(prompt, credential).await)
    }

    /// Look the credential up in `store`, then improve.
    pub async fn improve_with_store(
        &self,
        prompt: &str,
        store: &dyn CredentialStore,
    ) -> ImprovementResult {
        let result: Result<Vec<String>> = async {
            // Reject blank prompts before touching the store.
            ImprovementRequest::new(prompt)?;
            let credential = store.get().await?;
            self.try_improve(prompt, credential.as_ref()).await
        }
        .await;
        log_outcome(result)
    }

    /// Like [`Relay::improve`], but keeps the error typed.
    pub async fn try_improve(
        &self,
        prompt: &str,
        credential: Option<&Credential>,
    ) -> Result<Vec<String>> {
        let request = ImprovementRequest::new(prompt)?;
        let credential = credential.ok_or(Error::MissingCredential)?;

        let instruction = build_instruction(request.prompt(), self.language);
        debug!(prompt_chars = request.prompt().chars().count(), "requesting improvements");

        let raw = self.generator.generate(&instruction, credential).await?;
        let suggestions = parse_suggestions(&raw);
        if suggestions.is_empty() {
            return Err(Error::EmptyOrUnparsable { raw_response: raw });
        }
        Ok(suggestions)
    }
}

fn log_outcome(result: Result<Vec<String>>) -> ImprovementResult {
    match &result {
        Ok(suggestions) => info!(count = suggestions.len(), "prompt improvements ready"),
        Err(e) => warn!(kind = e.kind(), error = %e, "prompt improvement failed"),
    }
    ImprovementResult::from(result)
}
