use crate::error::{Result, SanctionsError};
use crate::types::{
    ConciseResults, Dataset, FullResult, FullResults, SanctionRecord, SearchDetail, SearchQuery,
    SearchResults,
};
use tracing::debug;

/// Lowercase, turn every character that is neither alphanumeric nor
/// whitespace into a space, collapse whitespace.
///
/// Tokens of the result are separated by exactly one space, which is what
/// whole-word matching relies on.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Records whose official name or any alias contains `term` as whole words.
pub fn search<'a>(dataset: &'a Dataset, term: &str) -> Result<Vec<&'a SanctionRecord>> {
    search_query(dataset, &SearchQuery::new(term))
}

/// Like [`search`], additionally narrowed by the query's entry type filter.
pub fn search_query<'a>(
    dataset: &'a Dataset,
    query: &SearchQuery,
) -> Result<Vec<&'a SanctionRecord>> {
    if query.term.trim().is_empty() {
        return Err(SanctionsError::InvalidQuery(
            "search term is empty".to_string(),
        ));
    }

    let normalized_term = normalize_name(&query.term);
    if normalized_term.is_empty() {
        return Err(SanctionsError::InvalidQuery(format!(
            "search term '{}' contains no searchable characters",
            query.term
        )));
    }
    let term_tokens: Vec<&str> = normalized_term.split(' ').collect();

    let category = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|category| !category.is_empty())
        .map(str::to_lowercase);

    let matches: Vec<&SanctionRecord> = dataset
        .iter()
        .filter(|record| {
            record
                .name_variants()
                .any(|variant| contains_tokens(&normalize_name(variant), &term_tokens))
        })
        .filter(|record| match &category {
            Some(category) => record.entry_type.to_lowercase().contains(category.as_str()),
            None => true,
        })
        .collect();

    debug!(
        "Search '{}' (type filter: {:?}) matched {} of {} records",
        normalized_term,
        category,
        matches.len(),
        dataset.len()
    );

    Ok(matches)
}

pub fn search_concise(dataset: &Dataset, query: &SearchQuery) -> Result<ConciseResults> {
    let names: Vec<String> = search_query(dataset, query)?
        .into_iter()
        .map(|record| record.official_name.clone())
        .collect();

    Ok(ConciseResults {
        count: names.len(),
        names,
    })
}

pub fn search_full(dataset: &Dataset, query: &SearchQuery) -> Result<FullResults> {
    let results: Vec<FullResult> = search_query(dataset, query)?
        .into_iter()
        .map(FullResult::from)
        .collect();

    Ok(FullResults {
        count: results.len(),
        results,
    })
}

pub fn search_with_detail(
    dataset: &Dataset,
    query: &SearchQuery,
    detail: SearchDetail,
) -> Result<SearchResults> {
    match detail {
        SearchDetail::Concise => search_concise(dataset, query).map(SearchResults::Concise),
        SearchDetail::Full => search_full(dataset, query).map(SearchResults::Full),
    }
}

// Contiguous token run; `normalized` must come from `normalize_name`.
fn contains_tokens(normalized: &str, term_tokens: &[&str]) -> bool {
    if normalized.is_empty() {
        return false;
    }
    let tokens: Vec<&str> = normalized.split(' ').collect();
    tokens
        .windows(term_tokens.len())
        .any(|window| window == term_tokens)
}
