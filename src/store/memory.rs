// src/store/memory.rs

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::model::ad::Advertisement;
use crate::store::{AdStore, CounterField, StoreError};

/// In-process reference store, keyed by ad id.
///
/// The counter bump happens entirely inside a single write-lock acquisition
/// with no await in between, so parallel `increment_field` calls for the same
/// ad serialize and none of them is lost.
#[derive(Default)]
pub struct MemoryAdStore {
    ads: RwLock<HashMap<String, Advertisement>>,
}

impl MemoryAdStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-load seed records, e.g. from a [`crate::model::adapters::SeedAdapter`].
    pub async fn load(&self, ads: Vec<Advertisement>) {
        let mut guard = self.ads.write().await;
        for ad in ads {
            guard.insert(ad.id.clone(), ad);
        }
    }

    pub async fn get(&self, id: &str) -> Option<Advertisement> {
        self.ads.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.ads.read().await.len()
    }
}

#[async_trait]
impl AdStore for MemoryAdStore {
    async fn find(
        &self,
        pred: &(dyn for<'a> Fn(&'a Advertisement) -> bool + Sync),
    ) -> Result<Vec<Advertisement>, StoreError> {
        let guard = self.ads.read().await;
        Ok(guard.values().filter(|ad| pred(ad)).cloned().collect())
    }

    async fn create(&self, ad: Advertisement) -> Result<(), StoreError> {
        self.ads.write().await.insert(ad.id.clone(), ad);
        Ok(())
    }

    async fn increment_field(
        &self,
        id: &str,
        field: CounterField,
        amount: u64,
    ) -> Result<(), StoreError> {
        let mut guard = self.ads.write().await;
        let ad = guard
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        match field {
            CounterField::Impressions => ad.impressions += amount,
            CounterField::Clicks => ad.clicks += amount,
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.ads.write().await.remove(id).is_some())
    }
}
