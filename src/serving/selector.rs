// src/serving/selector.rs

use crate::model::ad::Advertisement;

/// Orders the eligible set and cuts it down to what the slot can hold.
///
/// Priority descending, ties broken by most-recently-created first. The order
/// is fully deterministic so repeated requests within one process render the
/// same ads instead of flickering. An empty eligible set is a normal outcome
/// and yields an empty result, never an error.
pub fn select_for_slot(mut eligible: Vec<Advertisement>, max_count: usize) -> Vec<Advertisement> {
    eligible.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    eligible.truncate(max_count);
    eligible
}
