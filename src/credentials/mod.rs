//! Credential storage.
//!
//! A single API key is persisted under [`CREDENTIAL_KEY`]. The relay only
//! ever reads it; the settings commands write it.

pub mod memory;
pub mod os_keyring;

use async_trait::async_trait;
use std::fmt;

use crate::error::{Error, ErrorContext};
use crate::Result;

pub use self::memory::MemoryStore;
pub use self::os_keyring::KeyringStore;

/// Well-known key the credential is stored under.
pub const CREDENTIAL_KEY: &str = "geminiApiKey";

/// Number of trailing characters shown by [`Credential::masked`].
const MASK_VISIBLE_CHARS: usize = 5;

/// Opaque API key. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a secret, rejecting blank input.
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(Error::validation_with_context(
                "API key must not be empty",
                ErrorContext::new().with_field_path(CREDENTIAL_KEY),
            ));
        }
        Ok(Self(secret))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// `...` followed by the last five characters.
    pub fn masked(&self) -> String {
        let count = self.0.chars().count();
        let tail: String = self
            .0
            .chars()
            .skip(count.saturating_sub(MASK_VISIBLE_CHARS))
            .collect();
        format!("...{}", tail)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.masked()).finish()
    }
}

/// Display form used by settings surfaces.
pub fn display_credential(credential: Option<&Credential>) -> String {
    credential
        .map(Credential::masked)
        .unwrap_or_else(|| "not set".to_string())
}

/// Persistent key-value slot holding the API key.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self) -> Result<Option<Credential>>;
    async fn set(&self, credential: Credential) -> Result<()>;
    async fn clear(&self) -> Result<()>;
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_credential_rejected() {
        assert!(Credential::new("").is_err());
        assert!(Credential::new("   ").is_err());
        assert!(Credential::new("abc").is_ok());
    }

    #[test]
    fn test_masked_shows_last_five() {
        let c = Credential::new("AIzaSyExampleKey12345").unwrap();
        assert_eq!(c.masked(), "...12345");
        assert_eq!(Credential::new("abc").unwrap().masked(), "...abc");
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let c = Credential::new("super-secret-value").unwrap();
        let dbg = format!("{:?}", c);
        assert!(!dbg.contains("super-secret"));
        assert!(dbg.contains("...value"));
    }

    #[test]
    fn test_display_credential() {
        assert_eq!(display_credential(None), "not set");
        let c = Credential::new("key-00042").unwrap();
        assert_eq!(display_credential(Some(&c)), "...00042");
    }
}
