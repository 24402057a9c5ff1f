// src/model/query.rs

use serde::{Deserialize, Serialize};

use crate::model::ad::{AdContent, Advertisement, PageTarget, Position};

/// Page type of the request being rendered. Unlike [`PageTarget`] there is no
/// wildcard here; a request always comes from one concrete page.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    Home,
    Blog,
    Category,
    Post,
    Page,
}

impl PageType {
    /// Whether an ad's page-target entry covers this page type.
    pub fn matched_by(self, target: PageTarget) -> bool {
        match (self, target) {
            (_, PageTarget::All) => true,
            (PageType::Home, PageTarget::Home) => true,
            (PageType::Blog, PageTarget::Blog) => true,
            (PageType::Category, PageTarget::Category) => true,
            (PageType::Post, PageTarget::Post) => true,
            (PageType::Page, PageTarget::Page) => true,
            _ => false,
        }
    }
}

/// An inbound display request: which slot on which page wants ads.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AdQuery {
    pub position: Position,
    pub page_type: PageType,
    pub domain: Option<String>,
    pub category_id: Option<String>,
}

/// What the renderer gets back; targeting and counters stay server-side.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AdView {
    pub id: String,
    pub content: AdContent,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl From<&Advertisement> for AdView {
    fn from(ad: &Advertisement) -> Self {
        Self {
            id: ad.id.clone(),
            content: ad.content.clone(),
            width: ad.width,
            height: ad.height,
        }
    }
}

/// Structured result envelope for admin mutations.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MutationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MutationResult {
    pub fn ok(id: Option<String>) -> Self {
        Self {
            success: true,
            id,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            id: None,
            error: Some(error.into()),
        }
    }
}
