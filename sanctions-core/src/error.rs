use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SanctionsError {
    /// The document is not well-formed XML or is not an SDN list.
    #[error("Sanctions list parse failed: {0}")]
    Parse(String),

    /// The search term is empty once normalized.
    #[error("Invalid search query: {0}")]
    InvalidQuery(String),
}

pub type Result<T> = std::result::Result<T, SanctionsError>;
