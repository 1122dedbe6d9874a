use async_trait::async_trait;
use mongodb::{Client, Database, bson::doc, options::ClientOptions};
use tracing::info;

use crate::{
    error::StoreError,
    memory::{
        HaikuStore, PING_TIMEOUT, STORE_TIMEOUT, mongodb::haiku_collection::HaikuCollection,
        with_timeout,
    },
    types::haiku::Haiku,
};

pub mod haiku_collection;

const APP_NAME: &str = "garden-haiku";

pub struct MongodbHaikuStore {
    client: Client,
    db: Database,
    haikus: HaikuCollection,
}

impl MongodbHaikuStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let mut options = with_timeout("connect", STORE_TIMEOUT, async {
            Ok::<_, StoreError>(ClientOptions::parse(uri).await?)
        })
        .await?;
        options.app_name = Some(APP_NAME.to_string());
        options.server_selection_timeout = Some(STORE_TIMEOUT);
        options.connect_timeout = Some(STORE_TIMEOUT);

        let client = Client::with_options(options)?;
        let db = client.database(database);
        let haikus = HaikuCollection::new(&db);

        with_timeout("create_indexes", STORE_TIMEOUT, haikus.ensure_indexes()).await?;

        info!(database, "Haiku store initialized, using collection 'haikus'");
        Ok(Self { client, db, haikus })
    }

    pub async fn shutdown(self) {
        self.client.shutdown().await;
        info!("Disconnected from MongoDB");
    }
}

#[async_trait]
impl HaikuStore for MongodbHaikuStore {
    async fn append(&self, haiku: &Haiku) -> Result<(), StoreError> {
        with_timeout("append", STORE_TIMEOUT, self.haikus.insert_one(haiku)).await
    }

    async fn list_all(&self) -> Result<Vec<Haiku>, StoreError> {
        with_timeout("list_all", STORE_TIMEOUT, self.haikus.get_all_haikus()).await
    }

    async fn prune(&self, keep: usize) -> Result<u64, StoreError> {
        with_timeout("prune", STORE_TIMEOUT, self.haikus.delete_all_but_newest(keep)).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        with_timeout("ping", PING_TIMEOUT, async {
            self.db.run_command(doc! { "ping": 1 }).await?;
            Ok::<_, StoreError>(())
        })
        .await
    }
}

// Run against a live server with:
// MONGODB_URI=mongodb://localhost:27017 cargo test -- --ignored
#[cfg(test)]
mod tests {
    use chrono::{Duration, SubsecRound, Utc};
    use mongodb::bson::oid::ObjectId;

    use super::*;
    use crate::sensors::SensorReading;

    /// Connects to a throwaway database, or `None` when `MONGODB_URI` is unset.
    async fn scratch_store() -> Option<(MongodbHaikuStore, Database)> {
        let uri = std::env::var("MONGODB_URI").ok()?;
        let name = format!("garden_haiku_test_{}", ObjectId::new().to_hex());
        let store = MongodbHaikuStore::connect(&uri, &name).await.unwrap();
        let db = store.db.clone();
        Some((store, db))
    }

    fn haiku_at(text: &str, minutes_ago: i64) -> Haiku {
        let reading = SensorReading {
            moisture: 400,
            illumination: 800,
            temperature: 18,
            ph: 6,
        };
        let mut haiku = Haiku::new(text, &reading);
        haiku.date = (Utc::now() - Duration::minutes(minutes_ago)).trunc_subsecs(3);
        haiku
    }

    #[tokio::test]
    #[ignore]
    async fn empty_collection_lists_nothing() {
        let Some((store, db)) = scratch_store().await else {
            return;
        };

        let haikus = store.list_all().await.unwrap();
        db.drop().await.unwrap();

        assert!(haikus.is_empty());
    }

    #[tokio::test]
    #[ignore]
    async fn appended_haiku_reads_back_unchanged() {
        let Some((store, db)) = scratch_store().await else {
            return;
        };
        let original = haiku_at("dew on the basil", 0);

        store.append(&original).await.unwrap();
        let haikus = store.list_all().await.unwrap();
        store.ping().await.unwrap();
        db.drop().await.unwrap();

        assert_eq!(haikus, vec![original]);
    }

    #[tokio::test]
    #[ignore]
    async fn haikus_are_listed_newest_first() {
        let Some((store, db)) = scratch_store().await else {
            return;
        };
        let oldest = haiku_at("oldest", 120);
        let newest = haiku_at("newest", 0);
        let middle = haiku_at("middle", 60);

        for haiku in [&oldest, &newest, &middle] {
            store.append(haiku).await.unwrap();
        }
        let texts: Vec<_> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|h| h.text)
            .collect();
        db.drop().await.unwrap();

        assert_eq!(texts, ["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    #[ignore]
    async fn prune_keeps_only_the_newest() {
        let Some((store, db)) = scratch_store().await else {
            return;
        };
        for (text, minutes_ago) in [("a", 30), ("b", 20), ("c", 10), ("d", 0)] {
            store.append(&haiku_at(text, minutes_ago)).await.unwrap();
        }

        let removed = store.prune(2).await.unwrap();
        let removed_again = store.prune(2).await.unwrap();
        let texts: Vec<_> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|h| h.text)
            .collect();
        db.drop().await.unwrap();

        assert_eq!(removed, 2);
        assert_eq!(removed_again, 0);
        assert_eq!(texts, ["d", "c"]);
    }
}
