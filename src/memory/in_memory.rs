use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{error::StoreError, memory::HaikuStore, types::haiku::Haiku};

/// Process-local store for running without MongoDB.
#[derive(Debug, Default)]
pub struct InMemoryHaikuStore {
    haikus: RwLock<Vec<Haiku>>,
}

impl InMemoryHaikuStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HaikuStore for InMemoryHaikuStore {
    async fn append(&self, haiku: &Haiku) -> Result<(), StoreError> {
        self.haikus.write().await.push(haiku.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Haiku>, StoreError> {
        let mut haikus = self.haikus.read().await.clone();
        haikus.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(haikus)
    }

    async fn prune(&self, keep: usize) -> Result<u64, StoreError> {
        let mut haikus = self.haikus.write().await;
        if haikus.len() <= keep {
            return Ok(0);
        }

        haikus.sort_by(|a, b| b.date.cmp(&a.date));
        let removed = haikus.len() - keep;
        haikus.truncate(keep);

        Ok(removed as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
