//! HTTP HEAD probing of a (possibly rewritten) URL.
//!
//! Uses the curl crate (libcurl). This is the outbound request the CLI host
//! issues from its original dispatch function, i.e. after the interceptor has
//! already rewritten the URL and attached headers.

mod parse;

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::str;
use std::time::Duration;

use crate::config::ProbeConfig;

/// Result of a HEAD request.
#[derive(Debug, Clone)]
pub struct HeadResult {
    /// HTTP status of the final response.
    pub status: u32,
    /// URL after following redirects.
    pub effective_url: String,
    /// Total size in bytes, if `Content-Length` is present.
    pub content_length: Option<u64>,
    pub content_type: Option<String>,
    /// `Server` header, handy for telling mirrors apart.
    pub server: Option<String>,
}

/// Performs a HEAD request and returns parsed metadata.
///
/// Follows redirects. Custom headers (e.g. the ones the resolver injects) are
/// sent as-is. Fails on transport errors and non-2xx responses.
pub fn probe(
    url: &str,
    custom_headers: &HashMap<String, String>,
    cfg: &ProbeConfig,
) -> Result<HeadResult> {
    let mut headers: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.nobody(true)?; // HEAD request
    easy.follow_location(true)?;
    easy.connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))?;
    easy.timeout(Duration::from_secs(cfg.timeout_secs))?;

    let mut list = curl::easy::List::new();
    for (k, v) in custom_headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    if !custom_headers.is_empty() {
        easy.http_headers(list)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                headers.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.perform().context("HEAD request failed")?;
    }

    let status = easy.response_code().context("no response code")?;
    if !(200..300).contains(&status) {
        anyhow::bail!("HEAD {} returned HTTP {}", url, status);
    }
    let effective_url = easy
        .effective_url()?
        .map(str::to_string)
        .unwrap_or_else(|| url.to_string());

    let parsed = parse::parse_headers(&headers);
    Ok(HeadResult {
        status,
        effective_url,
        content_length: parsed.content_length,
        content_type: parsed.content_type,
        server: parsed.server,
    })
}
