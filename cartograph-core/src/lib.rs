pub mod crawl;
pub mod report;
