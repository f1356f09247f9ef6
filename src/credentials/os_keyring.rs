//! OS keyring backed store.
//!
//! Lookup order for `get`: keyring entry, then the `GEMINI_API_KEY`
//! environment variable. `set` and `clear` only touch the keyring.

use async_trait::async_trait;
use keyring::Entry;
use std::env;
use tracing::{debug, warn};

use super::{Credential, CredentialStore, CREDENTIAL_KEY};
use crate::error::{Error, ErrorContext};
use crate::Result;

/// Keyring service name entries are filed under.
pub const KEYRING_SERVICE: &str = "prompt-improver";

/// Environment variable consulted when the keyring has no entry.
pub const CREDENTIAL_ENV_VAR: &str = "GEMINI_API_KEY";

pub struct KeyringStore {
    service: String,
    key: String,
    env_fallback: Option<String>,
}

impl KeyringStore {
    pub fn new() -> Self {
        Self {
            service: KEYRING_SERVICE.to_string(),
            key: CREDENTIAL_KEY.to_string(),
            env_fallback: Some(CREDENTIAL_ENV_VAR.to_string()),
        }
    }

    /// Use a different keyring service name (e.g. per profile).
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    /// Disable or rename the environment fallback.
    pub fn with_env_fallback(mut self, var: Option<String>) -> Self {
        self.env_fallback = var;
        self
    }

    fn env_value(&self) -> Option<String> {
        self.env_fallback
            .as_deref()
            .and_then(|var| env::var(var).ok())
            .filter(|s| !s.trim().is_empty())
    }

    fn entry(service: &str, key: &str) -> Result<Entry> {
        Entry::new(service, key).map_err(|e| store_error("failed to open keyring entry", e))
    }

    // keyring calls block on the platform secret service
    async fn run_blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(Entry) -> Result<T> + Send + 'static,
    {
        let entry = Self::entry(&self.service, &self.key)?;
        tokio::task::spawn_blocking(move || f(entry))
            .await
            .map_err(|e| store_error("keyring task failed", e))?
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

fn store_error(msg: &str, e: impl std::fmt::Display) -> Error {
    Error::credential_store_with_context(
        msg,
        ErrorContext::new()
            .with_details(e.to_string())
            .with_source("keyring"),
    )
}

#[async_trait]
impl CredentialStore for KeyringStore {
    async fn get(&self) -> Result<Option<Credential>> {
        // Opening the entry can fail too; treat it like a read failure.
        let stored = self
            .run_blocking(|entry| match entry.get_password() {
                Ok(secret) => Ok(Some(secret)),
                Err(keyring::Error::NoEntry) => Ok(None),
                Err(e) => Err(store_error("failed to read API key", e)),
            })
            .await;

        let keyring_error = match stored {
            Ok(Some(secret)) if !secret.trim().is_empty() => {
                return Credential::new(secret).map(Some);
            }
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "keyring unavailable, trying environment");
                Some(e)
            }
        };

        match (self.env_value(), keyring_error) {
            (Some(secret), _) => {
                debug!("API key taken from environment");
                Credential::new(secret).map(Some)
            }
            (None, Some(e)) => Err(e),
            (None, None) => Ok(None),
        }
    }

    async fn set(&self, credential: Credential) -> Result<()> {
        self.run_blocking(move |entry| {
            entry
                .set_password(credential.expose())
                .map_err(|e| store_error("failed to save API key", e))
        })
        .await?;
        debug!(service = %self.service, "API key saved");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.run_blocking(|entry| match entry.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(store_error("failed to remove API key", e)),
        })
        .await
    }

    fn name(&self) -> &'static str {
        "keyring"
    }
}
