// src/serving/analytics.rs

use crate::error::AdError;
use crate::store::{AdStore, CounterField};

/// Counts one render of the ad. At-least-once semantics: each call is a
/// discrete event and the store applies it as a single atomic add, so
/// concurrent reports from parallel requests all land.
pub async fn record_impression(store: &dyn AdStore, ad_id: &str) -> Result<(), AdError> {
    store
        .increment_field(ad_id, CounterField::Impressions, 1)
        .await?;
    Ok(())
}

/// Counts one click-through on the ad.
pub async fn record_click(store: &dyn AdStore, ad_id: &str) -> Result<(), AdError> {
    store.increment_field(ad_id, CounterField::Clicks, 1).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ad::{AdContent, AdDraft, AdType, Placement};
    use crate::store::MemoryAdStore;
    use chrono::Utc;
    use std::sync::Arc;

    async fn seeded() -> MemoryAdStore {
        let store = MemoryAdStore::new();
        let draft = AdDraft {
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
            priority: 0,
            width: None,
            height: None,
            created_by: None,
        };
        let ad = draft.into_ad("banner-1".to_string(), Utc::now());
        store.create(ad).await.unwrap();
        store
    }

    #[tokio::test]
    async fn impressions_and_clicks_count_independently() {
        let store = seeded().await;
        record_impression(&store, "banner-1").await.unwrap();
        record_impression(&store, "banner-1").await.unwrap();
        record_click(&store, "banner-1").await.unwrap();

        let ad = store.get("banner-1").await.unwrap();
        assert_eq!(ad.impressions, 2);
        assert_eq!(ad.clicks, 1);
    }

    #[tokio::test]
    async fn click_on_missing_ad_is_not_found() {
        let store = seeded().await;
        let err = record_click(&store, "nope").await.unwrap_err();
        assert!(matches!(err, AdError::NotFound(_)));
        // Existing records stay untouched.
        assert_eq!(store.get("banner-1").await.unwrap().clicks, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn parallel_impressions_all_land() {
        let store = Arc::new(seeded().await);
        let n = 100;
        let tasks: Vec<_> = (0..n)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    record_impression(store.as_ref(), "banner-1").await.unwrap();
                })
            })
            .collect();
        futures::future::join_all(tasks).await;

        assert_eq!(store.get("banner-1").await.unwrap().impressions, n);
    }
}
