pub mod config;
pub mod errors;
pub mod fetcher;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod refresher;

// Re-exports for convenience
pub use errors::{ApiError, ApiResult};
pub use fetcher::SourceFetcher;
pub use refresher::Refresher;
