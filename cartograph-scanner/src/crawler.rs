use crate::canonical::canonicalize;
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::error::{CrawlError, Result};
use crate::extract::{MediaKind, extract_links};
use crate::frontier::Frontier;
use crate::graph::{Digraph, GraphMutator, ResourceGraph};
use crate::policy::{AccessPolicy, fetch_policy};
use crate::transport::{Fetched, HttpTransport, Transport};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};
use url::{Position, Url};

/// Called before each fetch with the URL and the number of URLs still queued.
pub type ProgressCallback = Arc<dyn Fn(&str, usize) + Send + Sync>;

/// Counters for one crawl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Requests that produced a response, whatever its status.
    pub fetched: usize,
    /// Requests that produced no response at all.
    pub failed: usize,
    /// Responses with a status of 400 or above.
    pub broken: usize,
    /// Followers dropped for being off-domain or disallowed by robots.txt.
    pub rejected: usize,
}

/// Single-threaded crawler confined to one domain.
///
/// Starts from the domain root plus the sitemaps robots.txt declares, and
/// follows every same-domain reference robots.txt allows, fetching each
/// canonical URL at most once.
pub struct Crawler<T: Transport = HttpTransport> {
    transport: T,
    base: Url,
    policy: AccessPolicy,
    diagnostics: Arc<dyn Diagnostics>,
    progress_callback: Option<ProgressCallback>,
    max_fetches: Option<usize>,
}

impl Crawler<HttpTransport> {
    /// Builds a crawler for `domain` that identifies itself as `agent`.
    pub async fn connect(domain: &str, agent: &str) -> Result<Self> {
        let transport = HttpTransport::new(agent)?;
        Self::with_transport(domain, agent, transport).await
    }
}

impl<T: Transport> Crawler<T> {
    /// Fails if `domain` is not an absolute http(s) URL or if robots.txt
    /// cannot be obtained.
    pub async fn with_transport(domain: &str, agent: &str, transport: T) -> Result<Self> {
        let parsed = Url::parse(domain)
            .map_err(|e| CrawlError::InvalidUrl(format!("{domain:?}: {e}")))?;
        let base = canonicalize(&parsed, "/")?;
        let policy = fetch_policy(&transport, &base, agent).await?;

        Ok(Self {
            transport,
            base,
            policy,
            diagnostics: Arc::new(TracingDiagnostics),
            progress_callback: None,
            max_fetches: None,
        })
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Stops the crawl after `max` requests even if URLs are still queued.
    pub fn with_max_fetches(mut self, max: usize) -> Self {
        self.max_fetches = Some(max);
        self
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    /// The domain root followed by every distinct same-domain sitemap.
    pub fn roots(&self) -> Vec<Url> {
        let mut roots = vec![self.base.clone()];
        let mut seen = HashSet::from([self.base.to_string()]);

        for site in self.policy.sitemaps() {
            let sitemap = match canonicalize(&self.base, site) {
                Ok(sitemap) => sitemap,
                Err(e) => {
                    self.diagnostics.record(&format!("skipping sitemap {site:?}: {e}"));
                    continue;
                }
            };
            if !same_site(&sitemap, &self.base) {
                self.diagnostics.record(&format!("wrong sitemap domain: {site:?}"));
                continue;
            }
            if seen.insert(sitemap.to_string()) {
                roots.push(sitemap);
            } else {
                debug!("duplicate sitemap {}", sitemap);
            }
        }

        roots
    }

    pub async fn crawl(&self) -> Arc<dyn ResourceGraph> {
        self.crawl_with_stats().await.0
    }

    /// Runs the crawl until no URL is left to visit and returns the graph.
    ///
    /// Never fails: problems with individual URLs are reported to the
    /// diagnostics sink and the crawl moves on.
    pub async fn crawl_with_stats(&self) -> (Arc<dyn ResourceGraph>, CrawlStats) {
        let graph = Arc::new(Digraph::new());
        let roots = self.roots();
        let root_keys: HashSet<String> = roots.iter().map(|u| u.to_string()).collect();
        let mut fringe: Frontier = roots.into_iter().collect();
        let mut stats = CrawlStats::default();

        info!("Starting crawl of {} with {} root(s)", self.base, fringe.len());

        while let Some(link) = fringe.remove() {
            if let Some(max) = self.max_fetches
                && stats.fetched + stats.failed >= max
            {
                info!("Fetch limit of {} reached, {} URL(s) left unvisited", max, fringe.len() + 1);
                break;
            }

            if let Some(ref callback) = self.progress_callback {
                callback(link.as_str(), fringe.len());
            }

            let page = match self.transport.fetch(&link).await {
                Ok(page) => page,
                Err(e) => {
                    stats.failed += 1;
                    self.diagnostics.record(&format!("fetching {link}: {e}"));
                    continue;
                }
            };
            stats.fetched += 1;

            if let Some(ref e) = page.body_error {
                self.diagnostics.record(&format!("reading body of {link}: {e}"));
            }

            if page.status >= 400 {
                stats.broken += 1;
                graph.mark_status(link.as_str(), page.status);
                info!("status {} : {}", page.status, link);
                continue;
            }

            let followers = self.followers(&link, &page);
            let found = followers.len();
            let mut new_links = 0;
            let mut rejected = 0;

            for follower in followers {
                if !self.is_acceptable(&follower) {
                    rejected += 1;
                    continue;
                }
                let key = follower.as_str();
                if !graph.contains(key) && !root_keys.contains(key) {
                    fringe.add(follower.clone());
                    new_links += 1;
                }
                graph.add_edge(link.as_str(), follower.as_str());
            }
            stats.rejected += rejected;

            info!(
                "fringe={} found={} (new={}, rejected={}) source={}",
                fringe.len(),
                found,
                new_links,
                rejected,
                link
            );

            graph.mark_status(link.as_str(), page.status);
        }

        info!(
            "Crawl complete. {} resources, {} links, {} fetched, {} failed",
            graph.resource_count(),
            graph.link_count(),
            stats.fetched,
            stats.failed
        );

        let graph: Arc<dyn ResourceGraph> = graph;
        (graph, stats)
    }

    /// Canonical URLs referenced by a successfully fetched page.
    fn followers(&self, link: &Url, page: &Fetched) -> Vec<Url> {
        let kind = match MediaKind::classify(page.content_type.as_deref()) {
            Ok(kind) => kind,
            Err(e) => {
                self.diagnostics.record(&format!("{link}: {e}"));
                return Vec::new();
            }
        };

        extract_links(&page.body, kind)
            .into_iter()
            .filter_map(|raw| match canonicalize(link, &raw) {
                Ok(url) => Some(url),
                Err(CrawlError::UnsupportedScheme(e)) => {
                    debug!("ignoring link on {}: {}", link, e);
                    None
                }
                Err(e) => {
                    self.diagnostics.record(&format!("bad link {raw:?} on {link}: {e}"));
                    None
                }
            })
            .collect()
    }

    fn is_acceptable(&self, follower: &Url) -> bool {
        if !same_site(follower, &self.base) {
            debug!("  -> {} is off-domain", follower);
            return false;
        }
        let path = &follower[Position::BeforePath..Position::AfterQuery];
        if !self.policy.test(path) {
            debug!("  -> {} is disallowed by robots.txt", follower);
            return false;
        }
        true
    }
}

/// Host plus explicit port; the scheme does not matter, so an https link
/// on an http crawl stays on site.
fn same_site(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port() == b.port()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemoryDiagnostics;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    const SITE: &str = "http://site.test";
    const AGENT: &str = "CartographBot";

    /// In-memory site keyed by path. Unknown paths answer 404, paths in
    /// `broken` fail at the transport level.
    #[derive(Default)]
    struct FakeSite {
        pages: HashMap<String, Fetched>,
        broken: HashSet<String>,
        hits: Mutex<HashMap<String, usize>>,
    }

    impl FakeSite {
        fn new() -> Self {
            Self::default().page("/robots.txt", "text/plain", "User-agent: *\nDisallow:\n")
        }

        fn page(mut self, path: &str, content_type: &str, body: &str) -> Self {
            self.pages.insert(
                path.to_string(),
                Fetched {
                    status: 200,
                    content_type: Some(content_type.to_string()),
                    body: body.to_string(),
                    body_error: None,
                },
            );
            self
        }

        fn html(self, path: &str, links: &[&str]) -> Self {
            let anchors: String = links.iter().map(|l| format!(r#"<a href="{l}">x</a>"#)).collect();
            self.page(path, "text/html", &format!("<html><body>{anchors}</body></html>"))
        }

        fn status(mut self, path: &str, status: u16, body: &str) -> Self {
            self.pages.insert(
                path.to_string(),
                Fetched {
                    status,
                    content_type: Some("text/html".to_string()),
                    body: body.to_string(),
                    body_error: None,
                },
            );
            self
        }

        /// A response whose body broke off after `partial`.
        fn cut_short(mut self, path: &str, status: u16, partial: &str) -> Self {
            self.pages.insert(
                path.to_string(),
                Fetched {
                    status,
                    content_type: Some("text/html".to_string()),
                    body: partial.to_string(),
                    body_error: Some("connection closed before message completed".to_string()),
                },
            );
            self
        }

        fn unreachable(mut self, path: &str) -> Self {
            self.broken.insert(path.to_string());
            self
        }

        fn hits(&self, path: &str) -> usize {
            self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
        }
    }

    impl Transport for Arc<FakeSite> {
        async fn fetch(&self, url: &Url) -> Result<Fetched> {
            let path = &url[Position::BeforePath..Position::AfterQuery];
            *self.hits.lock().unwrap().entry(path.to_string()).or_default() += 1;

            if self.broken.contains(path) {
                // any real reqwest error will do; this one never touches the network
                let err = reqwest::Client::new().get("http://[::1").build().unwrap_err();
                return Err(CrawlError::Http(err));
            }
            Ok(self.pages.get(path).cloned().unwrap_or(Fetched {
                status: 404,
                content_type: Some("text/plain".to_string()),
                body: String::new(),
                body_error: None,
            }))
        }
    }

    fn url(path: &str) -> String {
        format!("{SITE}{path}")
    }

    async fn crawler(site: FakeSite) -> (Crawler<Arc<FakeSite>>, Arc<FakeSite>, MemoryDiagnostics) {
        let site = Arc::new(site);
        let diagnostics = MemoryDiagnostics::new();
        let crawler = Crawler::with_transport(SITE, AGENT, site.clone())
            .await
            .unwrap()
            .with_diagnostics(Arc::new(diagnostics.clone()));
        (crawler, site, diagnostics)
    }

    fn refers_to(graph: &dyn ResourceGraph, link: &str) -> Vec<String> {
        graph.snapshot().resources[link].refers_to.iter().cloned().collect()
    }

    #[tokio::test]
    async fn test_cycle_terminates_and_skips_unreachable_pages() {
        let site = FakeSite::new()
            .html("/", &["/b"])
            .html("/b", &["/c"])
            .html("/c", &["/"])
            .html("/d", &["/"]);
        let (crawler, site, _) = crawler(site).await;

        let graph = crawler.crawl().await;

        assert_eq!(graph.resource_count(), 3);
        assert_eq!(graph.link_count(), 3);
        for path in ["/", "/b", "/c"] {
            assert!(graph.contains(&url(path)), "missing {path}");
            assert_eq!(site.hits(path), 1, "{path} fetched more than once");
        }
        assert!(!graph.contains(&url("/d")));
        assert_eq!(site.hits("/d"), 0);

        let snapshot = graph.snapshot();
        let root = &snapshot.resources[&url("/")];
        assert!(root.refered_by.contains(&url("/c")));
        assert_eq!(root.status, Some(200));
    }

    #[tokio::test]
    async fn test_robots_disallowed_links_are_not_recorded() {
        let site = FakeSite::new()
            .page("/robots.txt", "text/plain", "User-agent: *\nDisallow: /private\n")
            .html("/", &["/public", "/private/secret.html"])
            .html("/public", &[])
            .html("/private/secret.html", &[]);
        let (crawler, site, _) = crawler(site).await;

        let (graph, stats) = crawler.crawl_with_stats().await;

        assert!(graph.contains(&url("/")));
        assert!(graph.contains(&url("/public")));
        assert!(!graph.contains(&url("/private/secret.html")));
        assert_eq!(refers_to(graph.as_ref(), &url("/")), vec![url("/public")]);
        assert_eq!(site.hits("/private/secret.html"), 0);
        assert_eq!(stats.rejected, 1);
    }

    #[tokio::test]
    async fn test_error_status_is_recorded_without_outbound_edges() {
        let site = FakeSite::new()
            .html("/", &["/gone", "/teapot"])
            .status("/gone", 404, r#"<a href="/from-404">x</a>"#)
            .status("/teapot", 500, r#"<a href="/from-500">x</a>"#);
        let (crawler, _, _) = crawler(site).await;

        let (graph, stats) = crawler.crawl_with_stats().await;
        let snapshot = graph.snapshot();

        assert_eq!(snapshot.resources[&url("/gone")].status, Some(404));
        assert!(snapshot.resources[&url("/gone")].refers_to.is_empty());
        assert_eq!(snapshot.resources[&url("/teapot")].status, Some(500));
        assert!(!graph.contains(&url("/from-404")));
        assert!(!graph.contains(&url("/from-500")));
        assert_eq!(stats.broken, 2);
    }

    #[tokio::test]
    async fn test_each_url_is_fetched_once() {
        let site = FakeSite::new()
            .html("/", &["/", "/a", "/a/", "/a#top", "/b", "./a"])
            .html("/a", &["/", "/b", "/a"])
            .html("/b", &["/a", "/b?", "/"]);
        let (crawler, site, _) = crawler(site).await;

        let graph = crawler.crawl().await;

        for path in ["/", "/a", "/b"] {
            assert_eq!(site.hits(path), 1, "{path}");
        }
        assert_eq!(graph.resource_count(), 3);
        // every discovery is counted, duplicates included
        assert_eq!(graph.link_count(), 12);
        assert_eq!(refers_to(graph.as_ref(), &url("/")), vec![url("/"), url("/a"), url("/b")]);
    }

    #[tokio::test]
    async fn test_off_domain_links_are_dropped() {
        let site = FakeSite::new().html(
            "/",
            &[
                "http://elsewhere.test/page",
                "http://site.test:8080/other-port",
                "https://site.test:8443/other-port",
                "mailto:webmaster@site.test",
                "/local",
            ],
        );
        let (crawler, _, diagnostics) = crawler(site).await;

        let (graph, stats) = crawler.crawl_with_stats().await;

        assert_eq!(refers_to(graph.as_ref(), &url("/")), vec![url("/local")]);
        assert_eq!(stats.rejected, 3);
        assert!(diagnostics.lines().is_empty(), "{:?}", diagnostics.lines());
    }

    #[tokio::test]
    async fn test_scheme_switch_stays_on_site() {
        let site = FakeSite::new()
            .html("/", &["https://site.test/secure-page", "/plain"])
            .html("/secure-page", &[])
            .html("/plain", &[]);
        let (crawler, site, _) = crawler(site).await;

        let (graph, stats) = crawler.crawl_with_stats().await;

        assert_eq!(
            refers_to(graph.as_ref(), &url("/")),
            vec!["https://site.test/secure-page".to_string(), url("/plain")]
        );
        assert_eq!(graph.snapshot().resources["https://site.test/secure-page"].status, Some(200));
        assert_eq!(site.hits("/secure-page"), 1);
        assert_eq!(stats.rejected, 0);
    }

    #[tokio::test]
    async fn test_transport_failures_are_skipped() {
        let site = FakeSite::new()
            .html("/", &["/flaky", "/fine"])
            .html("/fine", &[])
            .unreachable("/flaky");
        let (crawler, _, diagnostics) = crawler(site).await;

        let (graph, stats) = crawler.crawl_with_stats().await;
        let snapshot = graph.snapshot();

        assert_eq!(snapshot.resources[&url("/flaky")].status, None);
        assert_eq!(snapshot.resources[&url("/fine")].status, Some(200));
        assert_eq!(stats.failed, 1);
        assert!(diagnostics.lines().iter().any(|l| l.contains("/flaky")));
    }

    #[tokio::test]
    async fn test_status_survives_a_broken_body() {
        let site = FakeSite::new()
            .html("/", &["/gone", "/partial"])
            .cut_short("/gone", 404, "")
            .cut_short("/partial", 200, r#"<a href="/kept">k</a><a hr"#)
            .html("/kept", &[]);
        let (crawler, _, diagnostics) = crawler(site).await;

        let (graph, stats) = crawler.crawl_with_stats().await;
        let snapshot = graph.snapshot();

        assert_eq!(snapshot.resources[&url("/gone")].status, Some(404));
        assert_eq!(snapshot.resources[&url("/partial")].status, Some(200));
        assert!(graph.contains(&url("/kept")));
        assert_eq!(stats.failed, 0);
        assert_eq!(stats.broken, 1);
        let lines = diagnostics.lines();
        assert!(lines.iter().any(|l| l.contains("reading body of") && l.contains("/gone")), "{lines:?}");
    }

    #[tokio::test]
    async fn test_non_link_bearing_types_are_not_parsed() {
        let site = FakeSite::new()
            .html("/", &["/logo.png", "/odd", "/notes.txt"])
            .page("/logo.png", "image/png", r#"<a href="/hidden-in-png">x</a>"#)
            .page("/odd", "not a content type", r#"<a href="/hidden-in-odd">x</a>"#)
            .page("/notes.txt", "text/plain", r#"<a href="/from-text">x</a>"#)
            .html("/from-text", &[]);
        let (crawler, _, diagnostics) = crawler(site).await;

        let graph = crawler.crawl().await;
        let snapshot = graph.snapshot();

        assert_eq!(snapshot.resources[&url("/logo.png")].status, Some(200));
        assert_eq!(snapshot.resources[&url("/odd")].status, Some(200));
        assert!(!graph.contains(&url("/hidden-in-png")));
        assert!(!graph.contains(&url("/hidden-in-odd")));
        assert!(graph.contains(&url("/from-text")));
        assert!(diagnostics.lines().iter().any(|l| l.contains("/odd")));
    }

    #[tokio::test]
    async fn test_malformed_links_are_reported_and_dropped() {
        let site = FakeSite::new().html("/", &["http://[::1", "/ok"]).html("/ok", &[]);
        let (crawler, _, diagnostics) = crawler(site).await;

        let graph = crawler.crawl().await;

        assert_eq!(graph.resource_count(), 2);
        assert!(diagnostics.lines().iter().any(|l| l.contains("bad link")));
    }

    #[tokio::test]
    async fn test_sitemaps_become_roots() {
        let robots = "\
User-agent: *
Disallow:
Sitemap: http://site.test/sitemap.xml
Sitemap: /sitemap.xml
Sitemap: http://elsewhere.test/sitemap.xml
Sitemap: http://[::1
";
        let sitemap = r#"<?xml version="1.0"?>
            <urlset><url><loc>http://site.test/only-in-sitemap</loc></url></urlset>"#;
        let site = FakeSite::new()
            .page("/robots.txt", "text/plain", robots)
            .page("/sitemap.xml", "application/xml", sitemap)
            .html("/", &[])
            .html("/only-in-sitemap", &["/"]);
        let (crawler, site, diagnostics) = crawler(site).await;

        let roots: Vec<String> = crawler.roots().iter().map(Url::to_string).collect();
        assert_eq!(roots, vec![url("/"), url("/sitemap.xml")]);
        assert!(diagnostics.lines().iter().any(|l| l.contains("wrong sitemap domain")));

        let graph = crawler.crawl().await;

        assert!(graph.contains(&url("/only-in-sitemap")));
        assert!(graph.contains(&url("/")));
        assert_eq!(site.hits("/sitemap.xml"), 1);
        assert_eq!(site.hits("/only-in-sitemap"), 1);
        assert_eq!(site.hits("/"), 1);
    }

    #[tokio::test]
    async fn test_fetch_limit_stops_the_crawl() {
        let site = FakeSite::new()
            .html("/", &["/1", "/2", "/3"])
            .html("/1", &[])
            .html("/2", &[])
            .html("/3", &[]);
        let (crawler, site, _) = crawler(site).await;
        let crawler = crawler.with_max_fetches(2);

        let (graph, stats) = crawler.crawl_with_stats().await;

        assert_eq!(stats.fetched, 2);
        assert_eq!(site.hits("/3"), 0);
        assert_eq!(graph.resource_count(), 4);
        assert_eq!(graph.snapshot().resources[&url("/3")].status, None);
    }

    #[tokio::test]
    async fn test_progress_callback_sees_every_fetch() {
        let site = FakeSite::new().html("/", &["/a"]).html("/a", &[]);
        let (crawler, _, _) = crawler(site).await;
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let crawler = crawler.with_progress_callback(Arc::new(move |url, _queued| {
            seen_clone.lock().unwrap().push(url.to_string());
        }));

        crawler.crawl().await;

        assert_eq!(*seen.lock().unwrap(), vec![url("/"), url("/a")]);
    }

    #[tokio::test]
    async fn test_construction_errors_are_fatal() {
        let site = Arc::new(FakeSite::new().unreachable("/robots.txt"));
        let err = Crawler::with_transport(SITE, AGENT, site.clone()).await.err().unwrap();
        assert!(matches!(err, CrawlError::Robots(_)));

        let err = Crawler::with_transport("not a url", AGENT, site.clone()).await.err().unwrap();
        assert!(matches!(err, CrawlError::InvalidUrl(_)));

        let err = Crawler::with_transport("ftp://site.test/", AGENT, site).await.err().unwrap();
        assert!(matches!(err, CrawlError::UnsupportedScheme(_)));
    }

    /// Test link discovery against a real HTTP server
    #[tokio::test]
    async fn test_link_discovery_over_http() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("User-agent: *\nDisallow: /admin\n", "text/plain"),
            )
            .mount(&mock_server)
            .await;

        let root_html = format!(
            r#"<html><head><link rel="stylesheet" href="/style.css"></head><body>
                <a href="{}/page1">Page 1</a>
                <a href="page2">Page 2</a>
                <a href="/admin">Admin</a>
                <a href="https://example.org/">Elsewhere</a>
            </body></html>"#,
            mock_server.uri()
        );
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(root_html, "text/html"),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/page1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(
                        r#"<html><body><a href="/page2">P2</a></body></html>"#,
                        "text/html",
                    ),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/page2"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/style.css"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("body { background: url(/bg.png) }", "text/css"),
            )
            .mount(&mock_server)
            .await;

        let crawler = Crawler::connect(&mock_server.uri(), AGENT).await.unwrap();
        let graph = crawler.crawl().await;
        let base = mock_server.uri();
        let snapshot = graph.snapshot();

        assert_eq!(graph.resource_count(), 4, "{:#?}", snapshot);
        assert_eq!(snapshot.resources[&format!("{base}/page1")].status, Some(200));
        assert_eq!(snapshot.resources[&format!("{base}/page2")].status, Some(404));
        assert_eq!(snapshot.resources[&format!("{base}/style.css")].status, Some(200));
        assert!(
            snapshot.resources[&format!("{base}/page2")]
                .refered_by
                .contains(&format!("{base}/page1"))
        );
        assert!(!graph.contains(&format!("{base}/admin")));
        assert!(!graph.contains(&format!("{base}/bg.png")));
    }
}
