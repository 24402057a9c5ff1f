// src/logging/delivery_log.rs

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::model::query::AdQuery;

/// One serve-call audit record, written per request to the delivery log.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DeliveryLog {
    pub timestamp: String,
    pub log_type: String,
    pub request_id: String,
    pub query: AdQuery,
    /// Active records the resolver saw as eligible, before ranking.
    pub eligible_count: usize,
    /// Ids actually handed to the renderer, in display order.
    pub served: Vec<String>,
    /// "filled", "no_fill" or "store_unavailable".
    pub result: String,
    pub elapsed_ms: u128,
}

impl DeliveryLog {
    pub fn new(request_id: &str, query: AdQuery) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            log_type: "ad_serve".to_string(),
            request_id: request_id.to_string(),
            query,
            eligible_count: 0,
            served: Vec::new(),
            result: "no_fill".to_string(),
            elapsed_ms: 0,
        }
    }

    pub fn set_served(&mut self, eligible_count: usize, served: Vec<String>) {
        self.eligible_count = eligible_count;
        self.result = if served.is_empty() {
            "no_fill".to_string()
        } else {
            "filled".to_string()
        };
        self.served = served;
    }

    pub fn set_store_unavailable(&mut self) {
        self.result = "store_unavailable".to_string();
    }
}
