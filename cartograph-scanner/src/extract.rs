use crate::error::{CrawlError, Result};
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// How a response body is treated for link discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Html,
    Xml,
    Svg,
    Text,
    /// Anything without links worth following: images, scripts, archives...
    Opaque,
}

impl MediaKind {
    /// Classifies a `Content-Type` header value. A missing or malformed
    /// header is an error; an unknown but well-formed one is `Opaque`.
    pub fn classify(content_type: Option<&str>) -> Result<Self> {
        let raw = content_type.ok_or_else(|| CrawlError::ContentType("missing".to_string()))?;
        let essence = raw.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();

        let well_formed = essence
            .split_once('/')
            .is_some_and(|(kind, sub)| is_token(kind) && is_token(sub));
        if !well_formed {
            return Err(CrawlError::ContentType(format!("{raw:?}")));
        }

        let kind = match essence.as_str() {
            "text/html" | "application/xhtml+xml" => MediaKind::Html,
            "application/atom+xml" | "text/xml" | "application/xml" => MediaKind::Xml,
            "image/svg+xml" => MediaKind::Svg,
            "text/plain" => MediaKind::Text,
            _ => MediaKind::Opaque,
        };
        Ok(kind)
    }

    pub fn bears_links(self) -> bool {
        self != MediaKind::Opaque
    }
}

fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b))
}

/// Element/attribute pairs known to hold a reference to another resource.
const LOCATORS: &[(&str, &str)] = &[
    ("a", "href"),
    ("area", "href"),
    ("base", "href"),
    ("link", "href"),
    ("audio", "src"),
    ("embed", "src"),
    ("iframe", "src"),
    ("img", "src"),
    ("input", "src"),
    ("script", "src"),
    ("source", "src"),
    ("track", "src"),
    ("video", "src"),
    ("blockquote", "cite"),
    ("del", "cite"),
    ("ins", "cite"),
    ("q", "cite"),
    ("applet", "codebase"),
    ("object", "data"),
    ("html", "manifest"),
    ("video", "poster"),
];

static SELECTORS: LazyLock<Vec<(Selector, &'static str)>> = LazyLock::new(|| {
    LOCATORS
        .iter()
        .filter_map(|(element, attr)| {
            Selector::parse(&format!("{element}[{attr}]"))
                .ok()
                .map(|selector| (selector, *attr))
        })
        .collect()
});

static SITEMAP_LOC: LazyLock<Option<Selector>> = LazyLock::new(|| Selector::parse("loc").ok());

/// Returns the raw link strings found in `body`, locator by locator.
///
/// Parsing is lenient, so any body yields a document; for XML documents
/// the text of sitemap `<loc>` entries is returned as well.
pub fn extract_links(body: &str, kind: MediaKind) -> Vec<String> {
    if !kind.bears_links() {
        return Vec::new();
    }

    let document = Html::parse_document(body);
    let mut links = Vec::new();

    for (selector, attr) in SELECTORS.iter() {
        for element in document.select(selector) {
            if let Some(value) = element.value().attr(attr) {
                links.push(value.to_string());
            }
        }
    }

    if kind == MediaKind::Xml
        && let Some(selector) = SITEMAP_LOC.as_ref()
    {
        for element in document.select(selector) {
            let text = element.text().collect::<String>();
            let text = text.trim();
            if !text.is_empty() {
                links.push(text.to_string());
            }
        }
    }

    links
}
