use chrono::DateTime as ChronoDateTime;
use futures::StreamExt;
use mongodb::{
    Database, IndexModel,
    bson::{DateTime, Document, doc, oid::ObjectId},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{error::StoreError, types::haiku::Haiku};

const COLLECTION_NAME: &str = "haikus";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HaikuDocument {
    pub _id: ObjectId,
    pub date: DateTime,
    pub text: String,
    pub moisture: i32,
    pub temperature: i32,
    pub illumination: i32,
    pub ph: i32,
}

impl TryFrom<&Haiku> for HaikuDocument {
    type Error = StoreError;

    fn try_from(haiku: &Haiku) -> Result<Self, Self::Error> {
        let _id = ObjectId::parse_str(&haiku.id)
            .map_err(|e| StoreError::Corrupt(format!("haiku id '{}': {e}", haiku.id)))?;

        Ok(Self {
            _id,
            date: DateTime::from_millis(haiku.date.timestamp_millis()),
            text: haiku.text.clone(),
            moisture: haiku.moisture,
            temperature: haiku.temperature,
            illumination: haiku.illumination,
            ph: haiku.ph,
        })
    }
}

impl TryFrom<HaikuDocument> for Haiku {
    type Error = StoreError;

    fn try_from(document: HaikuDocument) -> Result<Self, Self::Error> {
        let millis = document.date.timestamp_millis();
        let date = ChronoDateTime::from_timestamp_millis(millis)
            .ok_or_else(|| StoreError::Corrupt(format!("date {millis}ms is out of range")))?;

        Ok(Self {
            id: document._id.to_hex(),
            date,
            text: document.text,
            moisture: document.moisture,
            temperature: document.temperature,
            illumination: document.illumination,
            ph: document.ph,
        })
    }
}

pub struct HaikuCollection {
    collection: mongodb::Collection<HaikuDocument>,
}

impl HaikuCollection {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }

    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder().keys(doc! { "date": -1 }).build();
        self.collection.create_index(index).await?;
        Ok(())
    }

    pub async fn insert_one(&self, haiku: &Haiku) -> Result<(), StoreError> {
        let document = HaikuDocument::try_from(haiku)?;
        self.collection.insert_one(&document).await?;
        info!(id = %haiku.id, "Haiku saved");
        Ok(())
    }

    pub async fn get_all_haikus(&self) -> Result<Vec<Haiku>, StoreError> {
        let mut cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "date": -1 })
            .await?;

        let mut haikus = Vec::new();

        while let Some(document) = cursor.next().await {
            haikus.push(Haiku::try_from(document?)?);
        }

        debug!("Retrieved {} haikus", haikus.len());
        Ok(haikus)
    }

    pub async fn delete_all_but_newest(&self, keep: usize) -> Result<u64, StoreError> {
        let mut cursor = self
            .collection
            .clone_with_type::<Document>()
            .find(doc! {})
            .sort(doc! { "date": -1 })
            .skip(keep as u64)
            .projection(doc! { "_id": 1 })
            .await?;

        let mut stale = Vec::new();

        while let Some(document) = cursor.next().await {
            let document = document?;
            let id = document
                .get_object_id("_id")
                .map_err(|e| StoreError::Corrupt(e.to_string()))?;
            stale.push(id);
        }

        if stale.is_empty() {
            return Ok(0);
        }

        let result = self
            .collection
            .delete_many(doc! { "_id": { "$in": stale } })
            .await?;

        Ok(result.deleted_count)
    }
}
