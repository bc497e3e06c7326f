use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub id: String,
    pub title: String,
}

/// One entry of a search results page. Only the identifier takes part in matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub id: String,
}

impl SearchResultItem {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOutcome {
    pub found: bool,
    pub page: Option<u32>,
    /// 1-based index within `page`.
    pub position: Option<u32>,
    pub items_checked: u32,
}

impl ScanOutcome {
    pub fn not_found(items_checked: u32) -> Self {
        Self {
            found: false,
            page: None,
            position: None,
            items_checked,
        }
    }

    pub fn found(page: u32, position: u32, items_checked: u32) -> Self {
        Self {
            found: true,
            page: Some(page),
            position: Some(position),
            items_checked,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordOutcome {
    pub keyword: String,
    #[serde(flatten)]
    pub outcome: ScanOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankReport {
    pub product: ProductInfo,
    pub page_limit: u32,
    pub keywords: Vec<String>,
    /// Same order as `keywords`; shorter only when `truncated` is set.
    pub outcomes: Vec<KeywordOutcome>,
    pub truncated: bool,
    pub checked_at: String,
}
