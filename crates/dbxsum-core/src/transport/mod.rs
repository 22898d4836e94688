//! Structured HTTP transport for the service's content endpoints.
//!
//! A request returns an [`HttpResponse`] carrying status, headers and (for
//! error responses) the body, so callers read response metadata from the
//! value they got back rather than from shared state.

mod http;
mod parse;

pub use http::{perform, perform_with_progress};

use anyhow::{Context, Result};
use std::time::Duration;

use crate::metadata::{self, FileMetadata};

/// Header carrying the JSON argument of a content-endpoint call.
pub const API_ARG_HEADER: &str = "Dropbox-API-Arg";
/// Header carrying the JSON metadata result of a content-endpoint call.
pub const API_RESULT_HEADER: &str = "Dropbox-API-Result";

/// Status, headers and body of one HTTP exchange.
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u32,
    /// Headers of the final response, in arrival order.
    pub headers: Vec<(String, String)>,
    /// Error body for non-2xx responses; successful bodies go to the sink.
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header value whose name matches case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Turns a non-2xx response into an error naming the API error summary when present.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        match metadata::api_error_summary(&self.body) {
            Some(summary) => anyhow::bail!("HTTP {}: {}", self.status, summary),
            None => anyhow::bail!(
                "HTTP {}: {}",
                self.status,
                String::from_utf8_lossy(&self.body).trim()
            ),
        }
    }
}

/// One POST to a content endpoint.
#[derive(Debug, Clone)]
pub struct ContentRequest {
    pub url: String,
    pub access_token: String,
    /// JSON argument, sent in [`API_ARG_HEADER`].
    pub arg: serde_json::Value,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

/// Joins an endpoint (e.g. `2/files/download`) onto the content base URL.
pub fn content_endpoint(base: &str, endpoint: &str) -> Result<String> {
    let mut base = url::Url::parse(base).with_context(|| format!("invalid base URL {}", base))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    let joined = base
        .join(endpoint.trim_start_matches('/'))
        .with_context(|| format!("invalid endpoint {}", endpoint))?;
    Ok(joined.to_string())
}

/// Serializes `value` as JSON that is safe in an HTTP header:
/// every non-ASCII character is written as a `\uXXXX` escape.
pub fn header_safe_json(value: &serde_json::Value) -> Result<String> {
    let json = serde_json::to_string(value)?;
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    Ok(out)
}

/// Reads the metadata record from the [`API_RESULT_HEADER`] of a response.
pub fn api_result(response: &HttpResponse) -> Result<FileMetadata> {
    let raw = response
        .header(API_RESULT_HEADER)
        .with_context(|| format!("response has no {} header", API_RESULT_HEADER))?;
    let meta = metadata::parse_metadata(raw)
        .with_context(|| format!("parse {} header", API_RESULT_HEADER))?;
    Ok(meta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u32, headers: &[(&str, &str)], body: &[u8]) -> HttpResponse {
        HttpResponse {
            status,
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: body.to_vec(),
        }
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let r = response(200, &[("dropbox-api-result", "{}"), ("Content-Length", "3")], b"");
        assert_eq!(r.header("Dropbox-API-Result"), Some("{}"));
        assert_eq!(r.header("content-length"), Some("3"));
        assert_eq!(r.header("etag"), None);
    }

    #[test]
    fn api_result_parses_header_metadata() {
        let r = response(
            200,
            &[(API_RESULT_HEADER, r#"{"name": "a.txt", "size": 5, "content_hash": "ab"}"#)],
            b"",
        );
        let meta = api_result(&r).unwrap();
        assert_eq!(meta.name, "a.txt");
        assert_eq!(meta.size, Some(5));
    }

    #[test]
    fn api_result_missing_header_errors() {
        let r = response(200, &[], b"");
        let err = api_result(&r).unwrap_err();
        assert!(err.to_string().contains(API_RESULT_HEADER));
    }

    #[test]
    fn error_for_status_uses_summary() {
        let r = response(409, &[], br#"{"error_summary": "path/not_found/.", "error": {}}"#);
        let err = r.error_for_status().unwrap_err();
        assert_eq!(err.to_string(), "HTTP 409: path/not_found/.");

        let r = response(400, &[], b"Error in call to API function\n");
        let err = r.error_for_status().unwrap_err();
        assert_eq!(err.to_string(), "HTTP 400: Error in call to API function");

        assert!(response(206, &[], b"").error_for_status().is_ok());
    }

    #[test]
    fn endpoint_join_tolerates_missing_slash() {
        assert_eq!(
            content_endpoint("https://content.dropboxapi.com/", "2/files/download").unwrap(),
            "https://content.dropboxapi.com/2/files/download"
        );
        assert_eq!(
            content_endpoint("http://127.0.0.1:8080/base", "/2/files/download").unwrap(),
            "http://127.0.0.1:8080/base/2/files/download"
        );
        assert!(content_endpoint("not a url", "2/files/download").is_err());
    }

    #[test]
    fn header_json_escapes_non_ascii() {
        let arg = json!({"path": "/Fotos/Größe 😀.jpg"});
        let s = header_safe_json(&arg).unwrap();
        assert!(s.is_ascii());
        assert_eq!(s, r#"{"path":"/Fotos/Gr\u00f6\u00dfe \ud83d\ude00.jpg"}"#);
        let back: serde_json::Value = serde_json::from_str(&s).unwrap();
        assert_eq!(back, arg);
    }
}
