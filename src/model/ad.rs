// src/model/ad.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Presentational ad kind. A rendering hint only; never used for eligibility.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdType {
    Banner,
    Sidebar,
    Inline,
    Popup,
    Sticky,
}

/// Slot tags a page template exposes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    Header,
    Footer,
    SidebarTop,
    SidebarBottom,
    ContentTop,
    ContentMiddle,
    ContentBottom,
    BetweenPosts,
    AfterPost,
    BeforePost,
}

/// Page types an ad can target. `All` is a wildcard that matches any page.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PageTarget {
    Home,
    Blog,
    Category,
    Post,
    Page,
    All,
}

/// Where the ad may be rendered.
///
/// `Auto` ads are position-agnostic and eligible for whatever slot the caller
/// asks about; `Fixed` ads only ever fill their configured slot.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "mode", content = "position", rename_all = "lowercase")]
pub enum Placement {
    Auto,
    Fixed(Position),
}

/// Creative payload, tagged at construction time so a record is always one of
/// the two shapes rather than a bag of optional fields.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AdContent {
    Markup {
        code: String,
    },
    Image {
        url: String,
        link: Option<String>,
        alt_text: Option<String>,
    },
}

/// A persisted ad campaign record.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Advertisement {
    pub id: String,
    pub content: AdContent,
    pub ad_type: AdType,
    pub placement: Placement,
    /// Exact-match domain targeting; empty matches every domain.
    #[serde(default)]
    pub domains: Vec<String>,
    /// Page-type targeting; empty matches every page type.
    #[serde(default)]
    pub pages: Vec<PageTarget>,
    /// Category targeting; empty means no category restriction.
    #[serde(default)]
    pub categories: Vec<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// Kill switch, independent of the schedule window.
    pub is_active: bool,
    /// Higher wins ties and ordering.
    pub priority: i32,
    /// Lifetime counters, mutated only through `AdStore::increment_field`.
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Audit reference, unused by the serving logic.
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Admin-submitted ad definition; the store assigns id, counters and created_at.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AdDraft {
    pub content: AdContent,
    pub ad_type: AdType,
    pub placement: Placement,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub pages: Vec<PageTarget>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub priority: i32,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub created_by: Option<String>,
}

fn default_active() -> bool {
    true
}

impl AdDraft {
    pub fn into_ad(self, id: String, created_at: DateTime<Utc>) -> Advertisement {
        Advertisement {
            id,
            content: self.content,
            ad_type: self.ad_type,
            placement: self.placement,
            domains: self.domains,
            pages: self.pages,
            categories: self.categories,
            start_date: self.start_date,
            end_date: self.end_date,
            is_active: self.is_active,
            priority: self.priority,
            impressions: 0,
            clicks: 0,
            width: self.width,
            height: self.height,
            created_by: self.created_by,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_serializes_as_tagged_variant() {
        let fixed = Placement::Fixed(Position::SidebarTop);
        let json = serde_json::to_value(&fixed).unwrap();
        assert_eq!(json["mode"], "fixed");
        assert_eq!(json["position"], "sidebar-top");

        let auto: Placement = serde_json::from_str(r#"{"mode":"auto"}"#).unwrap();
        assert_eq!(auto, Placement::Auto);
    }

    #[test]
    fn content_roundtrips_both_shapes() {
        let markup = AdContent::Markup {
            code: "<script>render()</script>".to_string(),
        };
        let json = serde_json::to_string(&markup).unwrap();
        assert!(json.contains(r#""kind":"markup""#));

        let image: AdContent = serde_json::from_str(
            r#"{"kind":"image","url":"https://cdn.example.com/b.png","link":null,"alt_text":"promo"}"#,
        )
        .unwrap();
        match image {
            AdContent::Image { url, alt_text, .. } => {
                assert_eq!(url, "https://cdn.example.com/b.png");
                assert_eq!(alt_text.as_deref(), Some("promo"));
            }
            _ => panic!("expected image content"),
        }
    }

    #[test]
    fn unknown_position_is_rejected() {
        let res: Result<Position, _> = serde_json::from_str(r#""under-nav""#);
        assert!(res.is_err());
    }

    #[test]
    fn draft_defaults_to_active_with_zeroed_counters() {
        let draft: AdDraft = serde_json::from_str(
            r#"{
                "content": {"kind":"markup","code":"<b>hi</b>"},
                "ad_type": "banner",
                "placement": {"mode":"auto"},
                "start_date": null,
                "end_date": null,
                "width": null,
                "height": null,
                "created_by": null
            }"#,
        )
        .unwrap();
        assert!(draft.is_active);
        let ad = draft.into_ad("ad-1".to_string(), Utc::now());
        assert_eq!(ad.impressions, 0);
        assert_eq!(ad.clicks, 0);
    }
}
