//! Native transport: one HTTP exchange over libcurl.
//!
//! Runs a prepared request on a `curl::easy::Easy` handle: attaches the
//! identification header plus caller headers, transmits the encoded body,
//! surfaces both progress event streams through the caller's sink, and
//! collects status, raw body, and raw header lines. Blocking; callers in
//! async code wrap it in `spawn_blocking`.
//!
//! No timeouts are configured on the handle. Bounded latency is the
//! caller's concern.

mod headers;

pub(crate) use headers::parse_header_block;

use std::str;

use thiserror::Error;

use crate::encode::{Multipart, Part, PreparedRequest, WireBody};
use crate::progress::{Phase, ProgressSink};
use crate::request::Method;

/// Fixed identification header attached to every request so server-side
/// code can distinguish this client's calls.
pub const REQUESTED_WITH: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

/// Native transport failure: no status code was obtained (DNS, refused
/// connection, TLS, aborted transfer). Distinct from a classified non-2xx
/// response, which is not a transport fault.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport: {0}")]
    Curl(#[from] curl::Error),
    #[error("multipart body rejected by transport: {0}")]
    Form(#[from] curl::FormError),
    #[error("transfer completed without a status code")]
    NoStatus,
    #[error("transport worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Raw result of a completed exchange, before classification.
#[derive(Debug)]
pub(crate) struct RawExchange {
    pub status: u16,
    pub header_lines: Vec<String>,
    pub body: Vec<u8>,
}

/// Performs one exchange. Progress events are routed through `sink` on the
/// calling thread, strictly before this function returns.
pub(crate) fn perform(
    request: PreparedRequest,
    mut sink: ProgressSink,
) -> Result<RawExchange, TransportError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(&request.url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.progress(true)?;

    let mut list = curl::easy::List::new();
    list.append(&format!("{}: {}", REQUESTED_WITH.0, REQUESTED_WITH.1))?;
    for (name, value) in &request.headers {
        list.append(&format!("{}: {}", name.trim(), value.trim()))?;
    }
    easy.http_headers(list)?;

    match &request.body {
        WireBody::None => {}
        WireBody::Bytes(bytes) => {
            easy.post(true)?;
            easy.post_fields_copy(bytes)?;
        }
        WireBody::Multipart(multipart) => {
            easy.httppost(build_form(multipart)?)?;
        }
    }

    // The verb is applied after the body so CUSTOMREQUEST overrides the
    // POST implied by post_fields/httppost.
    match request.method {
        Method::Get => easy.get(true)?,
        Method::Head => easy.nobody(true)?,
        Method::Post => {
            if matches!(request.body, WireBody::None) {
                easy.post(true)?;
                easy.post_fields_copy(&[])?;
            }
        }
        other => easy.custom_request(other.as_str())?,
    }

    let mut header_lines: Vec<String> = Vec::new();
    let mut body: Vec<u8> = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(line) = str::from_utf8(data) {
                // A new status line starts the header block of the next hop
                // (redirects); only the final block is kept.
                if line.starts_with("HTTP/") {
                    header_lines.clear();
                }
                header_lines.push(line.trim_end().to_string());
            }
            true
        })?;
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.progress_function(|dl_total, dl_now, ul_total, ul_now| {
            if ul_total > 0.0 {
                sink.observe(Phase::Upload, ul_now as u64, ul_total as u64);
            }
            if dl_total > 0.0 {
                sink.observe(Phase::Download, dl_now as u64, dl_total as u64);
            }
            true
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if code == 0 {
        return Err(TransportError::NoStatus);
    }
    tracing::trace!(status = code, url = %request.url, "exchange complete");

    Ok(RawExchange {
        status: code as u16,
        header_lines,
        body,
    })
}

/// Converts the multipart container into a curl form. Text parts carry
/// their value inline; file parts carry a filename, MIME type, and bytes.
fn build_form(multipart: &Multipart) -> Result<curl::easy::Form, TransportError> {
    let mut form = curl::easy::Form::new();
    for part in multipart.parts() {
        match part {
            Part::Text { name, value } => {
                form.part(name).contents(value.as_bytes()).add()?;
            }
            Part::File {
                name,
                filename,
                mime,
                data,
            } => {
                form.part(name)
                    .buffer(filename, data.clone())
                    .content_type(mime)
                    .add()?;
            }
        }
    }
    Ok(form)
}
