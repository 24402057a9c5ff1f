// src/model/adapters.rs

use std::fs;

use crate::model::ad::Advertisement;

/// Source of seed campaign records loaded into the store at startup.
pub trait SeedAdapter: Send + Sync {
    fn get_ads(&self) -> Vec<Advertisement>;
}

/// Reads seed ads from a JSON file. A missing or unparseable file yields an
/// empty campaign set; the service still starts and simply serves no ads.
pub struct FileSeedAdapter {
    pub ads_file: String,
}

impl FileSeedAdapter {
    pub fn new(ads_file: &str) -> Self {
        Self {
            ads_file: ads_file.to_string(),
        }
    }
}

impl SeedAdapter for FileSeedAdapter {
    fn get_ads(&self) -> Vec<Advertisement> {
        let content = fs::read_to_string(&self.ads_file).unwrap_or_else(|_| "[]".to_string());
        match serde_json::from_str::<Vec<Advertisement>>(&content) {
            Ok(ads) => ads,
            Err(e) => {
                tracing::error!("unable to parse seed file {}: {}", self.ads_file, e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_no_ads() {
        let adapter = FileSeedAdapter::new("static/does_not_exist.json");
        assert!(adapter.get_ads().is_empty());
    }
}
