//! Blocking libcurl POST against a content endpoint.

use anyhow::{Context, Result};
use std::cell::Cell;
use std::io::{self, Write};
use std::str;

use super::parse::{parse_content_length, parse_header_lines, parse_status_line};
use super::{header_safe_json, ContentRequest, HttpResponse, API_ARG_HEADER};
use crate::progress::TransferProgress;

/// Performs `request`, streaming a successful body into `sink`.
///
/// Non-2xx bodies are kept in [`HttpResponse::body`] and never reach the
/// sink. A failing sink write aborts the transfer and its error is returned.
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub fn perform<W: Write + ?Sized>(request: &ContentRequest, sink: &mut W) -> Result<HttpResponse> {
    perform_with_progress(request, sink, &mut |_: TransferProgress| {})
}

/// Like [`perform`], calling `progress` after every body chunk the sink accepted.
pub fn perform_with_progress<W: Write + ?Sized>(
    request: &ContentRequest,
    sink: &mut W,
    progress: &mut dyn FnMut(TransferProgress),
) -> Result<HttpResponse> {
    let arg = header_safe_json(&request.arg)?;

    let mut easy = curl::easy::Easy::new();
    easy.url(&request.url).context("invalid URL")?;
    easy.post(true)?;
    easy.post_field_size(0)?;
    easy.connect_timeout(request.connect_timeout)?;
    easy.timeout(request.timeout)?;

    let mut list = curl::easy::List::new();
    list.append(&format!("Authorization: Bearer {}", request.access_token.trim()))?;
    list.append(&format!("{}: {}", API_ARG_HEADER, arg))?;
    // Drop curl's default form content type; content endpoints take none.
    list.append("Content-Type:")?;
    easy.http_headers(list)?;

    let mut header_lines: Vec<String> = Vec::new();
    let mut error_body: Vec<u8> = Vec::new();
    let mut sink_error: Option<io::Error> = None;
    let status = Cell::new(0u32);
    let content_length: Cell<Option<u64>> = Cell::new(None);
    let mut received: u64 = 0;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                let line = s.trim_end();
                if line.starts_with("HTTP/") {
                    status.set(parse_status_line(line).unwrap_or(0));
                    content_length.set(None);
                } else if let Some(len) = parse_content_length(line) {
                    content_length.set(Some(len));
                }
                header_lines.push(line.to_string());
            }
            true
        })?;
        transfer.write_function(|data| {
            if !(200..300).contains(&status.get()) {
                error_body.extend_from_slice(data);
                return Ok(data.len());
            }
            match sink.write_all(data) {
                Ok(()) => {
                    received += data.len() as u64;
                    progress(TransferProgress {
                        bytes_done: received,
                        total_bytes: content_length.get(),
                    });
                    Ok(data.len())
                }
                Err(e) => {
                    tracing::warn!("content sink write failed: {}", e);
                    sink_error = Some(e);
                    Ok(0) // abort transfer
                }
            }
        })?;
        transfer.perform()
    };

    if let Some(e) = sink_error {
        return Err(anyhow::Error::new(e).context("write response body"));
    }
    performed.with_context(|| format!("POST {} failed", request.url))?;

    let (parsed_status, headers) = parse_header_lines(&header_lines);
    let code = easy.response_code().context("no response code")?;
    let status = if code != 0 { code } else { parsed_status };
    tracing::debug!(url = %request.url, status, bytes = received, "content request finished");

    Ok(HttpResponse {
        status,
        headers,
        body: error_body,
    })
}
