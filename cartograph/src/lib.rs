pub mod commands;
pub mod handlers;

// Re-export crawl functionality from cartograph-core
pub use cartograph_core::crawl::{CrawlOptions, execute_crawl, extract_url_path};
pub use cartograph_core::report::ReportFormat;
