//! Parse HTTP response header lines.

/// Header fields picked out of a HEAD response.
#[derive(Debug, Default)]
pub(crate) struct ParsedHeaders {
    pub content_length: Option<u64>,
    pub content_type: Option<String>,
    pub server: Option<String>,
}

/// Parse collected header lines. With redirects, curl reports every hop's
/// headers; a status line resets so only the final response counts.
pub(crate) fn parse_headers(lines: &[String]) -> ParsedHeaders {
    let mut parsed = ParsedHeaders::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            parsed = ParsedHeaders::default();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                parsed.content_length = value.parse::<u64>().ok();
            } else if name.eq_ignore_ascii_case("content-type") {
                parsed.content_type = Some(value.to_string());
            } else if name.eq_ignore_ascii_case("server") {
                parsed.server = Some(value.to_string());
            }
        }
    }

    parsed
}
