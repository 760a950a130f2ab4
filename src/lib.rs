pub mod models;
pub mod selectors;
pub mod page;
pub mod http_provider;
pub mod chrome_provider;
pub mod extractor;
pub mod salary;
pub mod dates;
pub mod pagination;
pub mod export;
pub mod delay_manager;
pub mod logger;
pub mod cli;

#[cfg(test)]
mod scripted_provider;

// Exporting types for convenience
pub use models::JobListing;
pub use selectors::Selectors;
pub use page::{ListingNode, PageProvider, ProviderError};
pub use http_provider::HttpPageProvider;
pub use chrome_provider::ChromePageProvider;
pub use extractor::{FieldExtractor, ListingExtractionError};
pub use salary::SalaryNormalizer;
pub use pagination::{CrawlConfig, CrawlOutcome, Paginator, StopReason};
pub use export::{CsvSink, RecordSink};
