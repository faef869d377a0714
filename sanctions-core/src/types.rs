use serde::{Deserialize, Serialize};

/// List label stamped on every record from the SDN export.
pub const SDN_LIST_NAME: &str = "SDN";

/// Whole-word matches are always exact, so the score never varies.
pub const EXACT_MATCH_SCORE: &str = "100";

/// One sanctioned party, as extracted from a single `sdnEntry`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SanctionRecord {
    pub official_name: String,
    pub alias_names: Vec<String>,
    pub address: String,
    pub entry_type: String,
    pub programs: String,
    pub list_name: String,
    pub score: String,
}

impl SanctionRecord {
    /// Official name first, then aliases in document order.
    pub fn name_variants(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.official_name.as_str())
            .chain(self.alias_names.iter().map(String::as_str))
    }
}

/// All records of one loaded version of the list, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<SanctionRecord>,
    /// `Publish_Date` from the list header, when present
    pub publish_date: Option<String>,
    /// `Record_Count` from the list header; informational only
    pub declared_count: Option<usize>,
}

impl Dataset {
    pub fn new(records: Vec<SanctionRecord>) -> Self {
        Self {
            records,
            publish_date: None,
            declared_count: None,
        }
    }

    pub fn records(&self) -> &[SanctionRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SanctionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDetail {
    Concise,
    Full,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    /// Optional entry type filter, e.g. "vessel"
    pub category: Option<String>,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConciseResults {
    pub count: usize,
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FullResults {
    pub count: usize,
    pub results: Vec<FullResult>,
}

/// Externally visible shape of a matched record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FullResult {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Type")]
    pub entry_type: String,
    #[serde(rename = "Program(s)")]
    pub programs: String,
    #[serde(rename = "List")]
    pub list: String,
    #[serde(rename = "Score")]
    pub score: String,
}

impl From<&SanctionRecord> for FullResult {
    fn from(record: &SanctionRecord) -> Self {
        FullResult {
            name: record.official_name.clone(),
            address: record.address.clone(),
            entry_type: record.entry_type.clone(),
            programs: record.programs.clone(),
            list: record.list_name.clone(),
            score: record.score.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum SearchResults {
    Concise(ConciseResults),
    Full(FullResults),
}

impl SearchResults {
    pub fn count(&self) -> usize {
        match self {
            SearchResults::Concise(results) => results.count,
            SearchResults::Full(results) => results.count,
        }
    }
}
