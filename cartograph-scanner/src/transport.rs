use crate::error::Result;
use crate::extract::MediaKind;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// What the crawler needs to know about one GET.
///
/// `body` is only filled in when it might hold links: error responses and
/// opaque media come back with an empty body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
    /// Set when the body broke off mid-read; `body` holds what arrived.
    pub body_error: Option<String>,
}

/// Issues GET requests on behalf of the crawler. Any `Err` is a transport
/// failure: the request never produced a response.
pub trait Transport: Send + Sync {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<Fetched>> + Send;
}

pub const MAX_REDIRECTS: usize = 10;

/// Bodies longer than this are cut off.
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// reqwest-backed transport; follows up to [`MAX_REDIRECTS`] redirects.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    max_body_bytes: usize,
}

impl HttpTransport {
    pub fn new(agent: &str) -> Result<Self> {
        Self::with_timeout(agent, 10)
    }

    pub fn with_timeout(agent: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(agent)
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .pool_max_idle_per_host(8)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self {
            client,
            max_body_bytes: MAX_BODY_BYTES,
        })
    }

    pub fn with_max_body_bytes(mut self, max: usize) -> Self {
        self.max_body_bytes = max;
        self
    }
}

/// Error responses are never parsed, and neither is anything known to be
/// opaque. A missing or odd `Content-Type` still gets read (robots.txt is
/// often served without one).
fn wants_body(status: u16, content_type: Option<&str>) -> bool {
    status < 400 && !matches!(MediaKind::classify(content_type), Ok(MediaKind::Opaque))
}

impl Transport for HttpTransport {
    async fn fetch(&self, url: &Url) -> Result<Fetched> {
        debug!("Fetching {}", url);

        let mut response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let mut fetched = Fetched {
            status,
            content_type,
            body: String::new(),
            body_error: None,
        };
        if !wants_body(status, fetched.content_type.as_deref()) {
            debug!("Not reading body of {} ({})", url, status);
            return Ok(fetched);
        }

        let mut bytes = Vec::new();
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    let room = self.max_body_bytes - bytes.len();
                    if chunk.len() >= room {
                        bytes.extend_from_slice(&chunk[..room]);
                        debug!("Body of {} cut off at {} bytes", url, self.max_body_bytes);
                        break;
                    }
                    bytes.extend_from_slice(&chunk);
                }
                Ok(None) => break,
                Err(e) => {
                    fetched.body_error = Some(e.to_string());
                    break;
                }
            }
        }
        fetched.body = String::from_utf8_lossy(&bytes).into_owned();

        Ok(fetched)
    }
}
