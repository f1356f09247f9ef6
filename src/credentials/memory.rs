//! In-process credential store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Credential, CredentialStore};
use crate::Result;

#[derive(Default)]
pub struct MemoryStore {
    value: RwLock<Option<Credential>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            value: RwLock::new(Some(credential)),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn get(&self) -> Result<Option<Credential>> {
        Ok(self.value.read().await.clone())
    }

    async fn set(&self, credential: Credential) -> Result<()> {
        *self.value.write().await = Some(credential);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.value.write().await = None;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_overwrites_and_clear_removes() {
        let store = MemoryStore::new();
        assert!(store.get().await.unwrap().is_none());

        store.set(Credential::new("first").unwrap()).await.unwrap();
        store.set(Credential::new("second").unwrap()).await.unwrap();
        assert_eq!(store.get().await.unwrap().unwrap().expose(), "second");

        store.clear().await.unwrap();
        assert!(store.get().await.unwrap().is_none());
    }
}
