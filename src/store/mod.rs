// src/store/mod.rs

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::ad::Advertisement;

pub use memory::MemoryAdStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no ad record with id {0}")]
    NotFound(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Lifetime counters a caller may increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterField {
    Impressions,
    Clicks,
}

impl CounterField {
    pub fn as_str(self) -> &'static str {
        match self {
            CounterField::Impressions => "impressions",
            CounterField::Clicks => "clicks",
        }
    }
}

/// The persistence seam the serving core needs: filtered reads, record
/// creation, an atomic counter bump, and idempotent-friendly deletion.
///
/// `increment_field` must apply the add as one store-side operation. A
/// load-mutate-store sequence would drop concurrent updates, which is exactly
/// the race the counters exist to avoid.
#[async_trait]
pub trait AdStore: Send + Sync {
    /// Returns every record matching `pred`. Order is unspecified.
    async fn find(
        &self,
        pred: &(dyn for<'a> Fn(&'a Advertisement) -> bool + Sync),
    ) -> Result<Vec<Advertisement>, StoreError>;

    async fn create(&self, ad: Advertisement) -> Result<(), StoreError>;

    /// Atomically adds `amount` to the named counter of the record `id`.
    async fn increment_field(
        &self,
        id: &str,
        field: CounterField,
        amount: u64,
    ) -> Result<(), StoreError>;

    /// Removes the record. Returns `false` when no such record existed.
    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError>;
}
