// src/serving/engine.rs

use std::sync::Arc;
use std::time::Instant;

use tokio::time::timeout;
use uuid::Uuid;

use crate::config::ServeConfig;
use crate::logging::delivery_log::DeliveryLog;
use crate::logging::logger::DeliveryLogger;
use crate::model::query::{AdQuery, AdView};
use crate::serving::resolver::resolve_eligible;
use crate::serving::selector::select_for_slot;
use crate::store::AdStore;

/// Runs one display request end to end: resolve the eligible set, rank it,
/// truncate to the slot cardinality, and write one delivery record.
///
/// The display path is fail-open. A store error or an exceeded wait budget
/// serves zero ads; it never becomes a page-render failure.
pub async fn process_ad_request(
    query: AdQuery,
    store: &dyn AdStore,
    config: &ServeConfig,
    delivery_logger: &Arc<DeliveryLogger>,
) -> Vec<AdView> {
    let request_id = Uuid::new_v4().to_string();
    let start = Instant::now();
    let mut record = DeliveryLog::new(&request_id, query.clone());

    let now = chrono::Utc::now();
    let eligible = match timeout(config.store_wait(), resolve_eligible(store, &query, now)).await {
        Ok(Ok(ads)) => ads,
        Ok(Err(err)) => {
            tracing::warn!(request_id = %request_id, "ad store error, serving no ads: {}", err);
            record.set_store_unavailable();
            record.elapsed_ms = start.elapsed().as_millis();
            delivery_logger.log(serde_json::to_string(&record).unwrap_or_default());
            return Vec::new();
        }
        Err(_) => {
            tracing::warn!(
                request_id = %request_id,
                "ad store exceeded {}ms wait budget, serving no ads",
                config.store_wait_ms
            );
            record.set_store_unavailable();
            record.elapsed_ms = start.elapsed().as_millis();
            delivery_logger.log(serde_json::to_string(&record).unwrap_or_default());
            return Vec::new();
        }
    };

    let eligible_count = eligible.len();
    let selected = select_for_slot(eligible, config.max_per_slot);
    let views: Vec<AdView> = selected.iter().map(AdView::from).collect();

    record.set_served(eligible_count, views.iter().map(|v| v.id.clone()).collect());
    record.elapsed_ms = start.elapsed().as_millis();
    delivery_logger.log(serde_json::to_string(&record).unwrap_or_default());

    views
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ad::{AdContent, AdDraft, AdType, Placement, Position};
    use crate::model::query::PageType;
    use crate::store::{AdStore, MemoryAdStore, StoreError};
    use async_trait::async_trait;
    use chrono::Utc;

    fn logger() -> Arc<DeliveryLogger> {
        DeliveryLogger::new("logs/test", "delivery_test", 64, 32, 200)
    }

    fn query() -> AdQuery {
        AdQuery {
            position: Position::Header,
            page_type: PageType::Home,
            domain: None,
            category_id: None,
        }
    }

    fn draft(priority: i32) -> AdDraft {
        AdDraft {
            content: AdContent::Markup {
                code: "<b>x</b>".to_string(),
            },
            ad_type: AdType::Banner,
            placement: Placement::Auto,
            domains: vec![],
            pages: vec![],
            categories: vec![],
            start_date: None,
            end_date: None,
            is_active: true,
            priority,
            width: None,
            height: None,
            created_by: None,
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl AdStore for BrokenStore {
        async fn find(
            &self,
            _pred: &(dyn for<'a> Fn(&'a crate::model::ad::Advertisement) -> bool + Sync),
        ) -> Result<Vec<crate::model::ad::Advertisement>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn create(&self, _ad: crate::model::ad::Advertisement) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn increment_field(
            &self,
            _id: &str,
            _field: crate::store::CounterField,
            _amount: u64,
        ) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn delete_by_id(&self, _id: &str) -> Result<bool, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn fills_the_slot_with_highest_priority_ad() {
        let store = MemoryAdStore::new();
        store
            .create(draft(1).into_ad("low".to_string(), Utc::now()))
            .await
            .unwrap();
        store
            .create(draft(9).into_ad("high".to_string(), Utc::now()))
            .await
            .unwrap();

        let config = ServeConfig::new(1, 500);
        let views = process_ad_request(query(), &store, &config, &logger()).await;
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].id, "high");
    }

    #[tokio::test]
    async fn empty_store_serves_zero_ads_without_error() {
        let store = MemoryAdStore::new();
        let config = ServeConfig::default();
        let views = process_ad_request(query(), &store, &config, &logger()).await;
        assert!(views.is_empty());
    }

    #[tokio::test]
    async fn store_failure_degrades_to_empty() {
        let config = ServeConfig::default();
        let views = process_ad_request(query(), &BrokenStore, &config, &logger()).await;
        assert!(views.is_empty());
    }
}
