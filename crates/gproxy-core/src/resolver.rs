//! URL resolver: classifies a GitHub URL and swaps in the mirror prefix.
//!
//! The resolver is pure. It never touches the network; the interceptor feeds
//! it one URL per outbound request and merges the result back into the
//! request options.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::mirror::{Mirror, MirrorError};

pub const GITHUB_PREFIX: &str = "https://github.com/";
pub const RAW_PREFIX: &str = "https://raw.githubusercontent.com/";
const RELEASE_DOWNLOAD_MARKER: &str = "/releases/download/";

/// Headers attached to every request that passes the http(s) guard.
pub const INJECTED_HEADERS: [(&str, &str); 2] = [
    ("content-type", "application/x-www-form-urlencoded"),
    ("Access-Control-Allow-Origin", "*"),
];

/// Outcome of resolving one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveResult {
    pub url: String,
    /// Present only when the URL went through the rewrite path.
    pub headers: Option<HashMap<String, String>>,
}

impl ResolveResult {
    fn passthrough(url: &str) -> Self {
        Self {
            url: url.to_string(),
            headers: None,
        }
    }

    /// True if `url` differs from `original`.
    pub fn rewritten(&self, original: &str) -> bool {
        self.url != original
    }
}

/// Mirror currently selected by the user, shared between the plugin and the
/// installed interceptor.
#[derive(Debug, Clone, Default)]
pub struct ActiveMirror(Rc<Cell<Mirror>>);

impl ActiveMirror {
    pub fn new(mirror: Mirror) -> Self {
        Self(Rc::new(Cell::new(mirror)))
    }

    pub fn get(&self) -> Mirror {
        self.0.get()
    }

    pub fn set(&self, mirror: Mirror) {
        self.0.set(mirror);
    }
}

/// Turns an outbound URL into the URL that is actually requested.
pub trait Resolver {
    fn resolve(&self, url: &str) -> ResolveResult;
}

/// Resolver backed by the mirror table and the active mirror selection.
#[derive(Debug, Clone)]
pub struct MirrorResolver {
    active: ActiveMirror,
}

impl MirrorResolver {
    pub fn new(active: ActiveMirror) -> Self {
        Self { active }
    }
}

impl Resolver for MirrorResolver {
    fn resolve(&self, url: &str) -> ResolveResult {
        resolve(url, self.active.get())
    }
}

/// Rewrites `url` for `mirror`.
///
/// - Input not starting with `http` is returned untouched with no headers.
/// - Release asset downloads (`/releases/download/`) use the download prefix,
///   other `https://github.com/` URLs use the repo prefix.
/// - `https://raw.githubusercontent.com/` URLs use the raw prefix. This is
///   computed from the original URL and wins over the download/repo result.
/// - Anything else passing the guard keeps its URL but still gets
///   [`INJECTED_HEADERS`].
///
/// # Examples
///
/// - `resolve("https://github.com/foo/bar", Mirror::Ghproxy).url` →
///   `"https://mirror.ghproxy.com/https://github.com/foo/bar"`
pub fn resolve(url: &str, mirror: Mirror) -> ResolveResult {
    if !url.starts_with("http") {
        return ResolveResult::passthrough(url);
    }

    let endpoints = mirror.endpoints();
    let is_download = url.contains(RELEASE_DOWNLOAD_MARKER);
    let is_raw = url.starts_with(RAW_PREFIX);

    let mut new_url = if is_download {
        url.replacen(GITHUB_PREFIX, endpoints.download, 1)
    } else {
        url.replacen(GITHUB_PREFIX, endpoints.repo, 1)
    };

    // Raw wins; recompute from the original URL.
    if is_raw {
        new_url = url.replacen(RAW_PREFIX, endpoints.raw, 1);
    }

    if new_url != url && !is_well_formed(&new_url) && is_well_formed(url) {
        tracing::warn!(
            "rewrite of {} via {} produced malformed URL {}; keeping original",
            url,
            mirror,
            new_url
        );
        new_url = url.to_string();
    }

    ResolveResult {
        url: new_url,
        headers: Some(injected_headers()),
    }
}

/// Like [`resolve`], but takes a raw mirror identifier and fails fast when it
/// is not in the table.
pub fn resolve_by_id(url: &str, mirror_id: &str) -> Result<ResolveResult, MirrorError> {
    let mirror: Mirror = mirror_id.parse()?;
    Ok(resolve(url, mirror))
}

fn injected_headers() -> HashMap<String, String> {
    INJECTED_HEADERS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn is_well_formed(candidate: &str) -> bool {
    url::Url::parse(candidate).is_ok()
}
