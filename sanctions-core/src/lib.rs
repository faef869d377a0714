pub mod error;
pub mod extractor;
pub mod matcher;
pub mod store;
pub mod types;
pub mod xml;

pub use error::{Result, SanctionsError};
pub use extractor::extract;
pub use matcher::{
    normalize_name, search, search_concise, search_full, search_query, search_with_detail,
};
pub use store::DatasetStore;
pub use types::{
    ConciseResults, Dataset, FullResult, FullResults, SanctionRecord, SearchDetail, SearchQuery,
    SearchResults,
};
