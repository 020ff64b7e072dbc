use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("robots.txt unavailable: {0}")]
    Robots(String),

    #[error("Unusable content type: {0}")]
    ContentType(String),
}

impl From<url::ParseError> for CrawlError {
    fn from(e: url::ParseError) -> Self {
        CrawlError::InvalidUrl(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CrawlError>;
