use chrono::{DateTime, Utc};
use sanctions_core::SearchQuery;
use serde::{Deserialize, Serialize};

// ===== Search Request =====
#[derive(Debug, Deserialize, Clone)]
pub struct SearchParams {
    pub name: Option<String>,
    /// Entry type filter, e.g. `?type=vessel`
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
}

impl SearchParams {
    /// `None` when the name is missing or blank.
    pub fn to_query(&self) -> Option<SearchQuery> {
        let name = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())?;
        let query = SearchQuery::new(name);
        Some(match &self.entry_type {
            Some(entry_type) => query.with_category(entry_type.clone()),
            None => query,
        })
    }
}

// ===== Refresh =====
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RefreshResponse {
    pub message: String,
}

// ===== Health Check =====
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub records_loaded: usize,
    pub publish_date: Option<String>,
    pub loaded_at: Option<DateTime<Utc>>,
}
