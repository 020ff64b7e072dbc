use cartograph_scanner::{Crawler, HttpTransport, ProgressCallback, ResourceGraph};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;
use url::Url;

pub const DEFAULT_AGENT: &str = "CartographBot/0.1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Options for configuring a crawl operation
pub struct CrawlOptions {
    pub url: String,
    pub agent: String,
    pub timeout_secs: u64,
    pub max_fetches: Option<usize>,
    pub show_progress_bars: bool,
}

impl CrawlOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            agent: DEFAULT_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_fetches: None,
            show_progress_bars: false,
        }
    }
}

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Execute a crawl with the given options and return the finished graph.
///
/// Only setting the crawl up can fail (bad URL, unreachable robots.txt);
/// once running, the crawl always produces a graph.
pub async fn execute_crawl(options: CrawlOptions) -> Result<Arc<dyn ResourceGraph>, String> {
    let CrawlOptions {
        url,
        agent,
        timeout_secs,
        max_fetches,
        show_progress_bars,
    } = options;

    let transport = HttpTransport::with_timeout(&agent, timeout_secs)
        .map_err(|e| format!("Failed to build HTTP client: {}", e))?;
    let mut crawler = Crawler::with_transport(&url, &agent, transport)
        .await
        .map_err(|e| format!("Failed to start crawl of {}: {}", url, e))?;

    if let Some(max) = max_fetches {
        crawler = crawler.with_max_fetches(max);
    }

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(format!("Starting crawl of {}...", crawler.base()));
        Some(pb)
    } else {
        None
    };

    let processed_count = Arc::new(AtomicUsize::new(0));

    if let Some(ref pb) = progress_bar {
        let pb_clone = pb.clone();
        let count_clone = processed_count.clone();
        let callback: ProgressCallback = Arc::new(move |url: &str, queued: usize| {
            let count = count_clone.fetch_add(1, Ordering::Relaxed) + 1;
            pb_clone.set_message(format!(
                "Crawling... {} fetched, {} queued: {}",
                count,
                queued,
                extract_url_path(url)
            ));
            pb_clone.tick();
        });
        crawler = crawler.with_progress_callback(callback);
    }

    debug!("robots policy: {:?}", crawler.policy());

    let (graph, stats) = crawler.crawl_with_stats().await;

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!(
            "Crawl complete! {} fetched, {} failed, {} broken",
            stats.fetched, stats.failed, stats.broken
        ));
    }

    Ok(graph)
}
