//! Parse raw response header lines into a status and header list.

/// Parses collected header lines. Only the last response block counts:
/// each `HTTP/` status line (interim 100-continue, redirects) starts over.
pub(crate) fn parse_header_lines(lines: &[String]) -> (u32, Vec<(String, String)>) {
    let mut status = 0;
    let mut headers = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            status = parse_status_line(line).unwrap_or(0);
            headers.clear();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    (status, headers)
}

/// Status code from a line like `HTTP/1.1 200 OK` or `HTTP/2 409`.
pub(crate) fn parse_status_line(line: &str) -> Option<u32> {
    line.split_whitespace().nth(1)?.parse().ok()
}

/// `Content-Length` value from a single header line, if that is what the line holds.
pub(crate) fn parse_content_length(line: &str) -> Option<u64> {
    let (name, value) = line.split_once(':')?;
    if !name.trim().eq_ignore_ascii_case("content-length") {
        return None;
    }
    value.trim().parse().ok()
}
