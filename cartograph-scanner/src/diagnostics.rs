use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;

/// Receives one line per recoverable problem met during a crawl: failed
/// fetches, bad content types, unusable links, foreign sitemaps.
pub trait Diagnostics: Send + Sync {
    fn record(&self, line: &str);
}

/// Default sink, forwards every line to `tracing` at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn record(&self, line: &str) {
        warn!(target: "cartograph::crawl", "{}", line);
    }
}

/// Keeps every line in memory so callers can inspect them after the crawl.
#[derive(Debug, Clone, Default)]
pub struct MemoryDiagnostics {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn record(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }
}
