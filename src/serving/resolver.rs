// src/serving/resolver.rs

use chrono::{DateTime, Utc};

use crate::model::ad::{Advertisement, Placement};
use crate::model::query::AdQuery;
use crate::store::{AdStore, StoreError};

/// Whether `ad` may be shown for `query` at instant `now`.
///
/// Every predicate must pass. Within one targeting dimension the configured
/// values are alternatives (OR); across dimensions they all constrain (AND).
/// Both schedule boundaries are inclusive.
pub fn is_eligible(ad: &Advertisement, query: &AdQuery, now: DateTime<Utc>) -> bool {
    if !ad.is_active {
        return false;
    }
    if let Some(start) = ad.start_date {
        if start > now {
            return false;
        }
    }
    if let Some(end) = ad.end_date {
        if end < now {
            return false;
        }
    }
    match ad.placement {
        Placement::Auto => {}
        Placement::Fixed(position) => {
            if position != query.position {
                return false;
            }
        }
    }
    if !ad.domains.is_empty() {
        match &query.domain {
            Some(domain) if ad.domains.iter().any(|d| d == domain) => {}
            _ => return false,
        }
    }
    if !ad.pages.is_empty() && !ad.pages.iter().any(|t| query.page_type.matched_by(*t)) {
        return false;
    }
    if !ad.categories.is_empty() {
        match &query.category_id {
            Some(category) if ad.categories.iter().any(|c| c == category) => {}
            _ => return false,
        }
    }
    true
}

/// Pulls the set of ads eligible for `query` out of the store.
///
/// Result order is unspecified; ranking is the selector's job. Store failures
/// propagate so the engine can degrade the render path to an empty slot.
pub async fn resolve_eligible(
    store: &dyn AdStore,
    query: &AdQuery,
    now: DateTime<Utc>,
) -> Result<Vec<Advertisement>, StoreError> {
    store.find(&|ad| is_eligible(ad, query, now)).await
}
