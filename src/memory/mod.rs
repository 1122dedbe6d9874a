use std::{future::Future, time::Duration};

use async_trait::async_trait;

use crate::{error::StoreError, types::haiku::Haiku};

pub mod in_memory;
pub mod mongodb;

pub use self::in_memory::InMemoryHaikuStore;
pub use self::mongodb::MongodbHaikuStore;

pub const STORE_TIMEOUT: Duration = Duration::from_secs(10);
pub const PING_TIMEOUT: Duration = Duration::from_secs(2);

/// Append-only history of generated haikus.
#[async_trait]
pub trait HaikuStore: Send + Sync {
    async fn append(&self, haiku: &Haiku) -> Result<(), StoreError>;

    /// Every stored haiku, newest first.
    async fn list_all(&self) -> Result<Vec<Haiku>, StoreError>;

    /// Deletes everything but the `keep` newest haikus and returns how many were removed.
    async fn prune(&self, keep: usize) -> Result<u64, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

pub(crate) async fn with_timeout<T, F>(
    operation: &'static str,
    limit: Duration,
    future: F,
) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(limit, future).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout {
            operation,
            seconds: limit.as_secs(),
        }),
    }
}
