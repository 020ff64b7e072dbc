//! Turns raw link strings into the canonical URLs used as graph keys.
//!
//! Two spellings of the same resource must end up as one key, otherwise
//! the crawler would fetch it twice and, on sites that vary links
//! trivially, never run out of "new" pages.

use crate::error::{CrawlError, Result};
use url::Url;

/// Resolves `raw` against `base` and normalizes the result.
pub fn canonicalize(base: &Url, raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let mut url = base.join(raw)?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(CrawlError::UnsupportedScheme(format!("{other:?} in {raw:?}")));
        }
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(CrawlError::InvalidUrl(format!("no host in {raw:?}")));
    }

    url.set_fragment(None);

    let query = url.query().map(normalize_escapes);
    url.set_query(query.as_deref().filter(|q| !q.is_empty()));

    let mut path = normalize_escapes(url.path());
    if path.len() > 1 && path.ends_with('/') {
        path.pop();
    }
    url.set_path(&path);

    Ok(url)
}

/// Uppercases the hex digits of every percent escape and decodes the ones
/// that stand for unreserved characters.
fn normalize_escapes(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                let decoded = hi * 16 + lo;
                if is_unreserved(decoded) {
                    out.push(char::from(decoded));
                } else {
                    out.push('%');
                    out.push(char::from(bytes[i + 1]).to_ascii_uppercase());
                    out.push(char::from(bytes[i + 2]).to_ascii_uppercase());
                }
                i += 3;
                continue;
            }
        }
        // Everything else in a url-crate path or query is already ASCII.
        out.push(char::from(bytes[i]));
        i += 1;
    }

    out
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')
}
