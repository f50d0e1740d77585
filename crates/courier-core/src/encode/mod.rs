//! Content-type driven payload encoding.
//!
//! Turns the validated request description into a wire-ready payload:
//! query-string folding for GET, urlencoded/JSON bytes or a multipart
//! container for everything else. Pure; the transport does the sending.

mod multipart;
mod urlencoded;

pub use multipart::{Multipart, Part};
pub use urlencoded::{urldecode, urlencode};

use serde_json::Value;
use thiserror::Error;

use crate::request::{Method, RequestConfig, RequestData};

/// The three recognized wire content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Urlencoded,
    Json,
    Form,
}

/// Wire value for [`ContentType::Urlencoded`].
pub const URLENCODED: &str = "application/x-www-form-urlencoded; charset=utf-8";
/// Wire value for [`ContentType::Json`].
pub const JSON: &str = "application/json; charset=utf-8";
/// Wire value for [`ContentType::Form`]. Never sent as a header by this
/// library; the transport generates the boundary form of it.
pub const FORM: &str = "multipart/form-data";

impl ContentType {
    /// The MIME string sent as the `content-type` header.
    pub fn as_mime(&self) -> &'static str {
        match self {
            ContentType::Urlencoded => URLENCODED,
            ContentType::Json => JSON,
            ContentType::Form => FORM,
        }
    }

    /// Matches a caller-supplied wire value, with or without parameters
    /// (`application/json` and `application/json; charset=utf-8` both
    /// resolve to `Json`).
    pub fn from_mime(value: &str) -> Option<Self> {
        let bare = value.split(';').next().unwrap_or("").trim();
        if bare.eq_ignore_ascii_case("application/x-www-form-urlencoded") {
            Some(ContentType::Urlencoded)
        } else if bare.eq_ignore_ascii_case("application/json") {
            Some(ContentType::Json)
        } else if bare.eq_ignore_ascii_case("multipart/form-data") {
            Some(ContentType::Form)
        } else {
            None
        }
    }
}

/// Payload conversion failure. Surfaced before any network activity.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("`data` must be a key/value mapping for {0} encoding")]
    NotAMapping(&'static str),
}

/// Body handed to the transport.
#[derive(Debug, Clone)]
pub(crate) enum WireBody {
    None,
    Bytes(Vec<u8>),
    Multipart(Multipart),
}

/// Fully encoded request, ready for the native transport.
#[derive(Debug, Clone)]
pub(crate) struct PreparedRequest {
    pub method: Method,
    pub url: String,
    /// Caller headers plus the content-type header chosen here. The fixed
    /// identification header is attached by the transport itself.
    pub headers: Vec<(String, String)>,
    pub body: WireBody,
}

/// Encodes `config` per its method and effective content type.
///
/// GET folds the urlencoded data into the URL query string and carries no
/// body. Other methods default to JSON unless the caller chose otherwise;
/// a multipart-capable `data` forces FORM regardless of the caller's
/// choice. FORM sets no content-type header.
pub(crate) fn prepare(config: &RequestConfig) -> Result<PreparedRequest, EncodeError> {
    let mut headers = config.headers.clone();

    let (url, body) = if config.method == Method::Get {
        (
            fold_into_query(&config.url, config.data.as_ref())?,
            WireBody::None,
        )
    } else {
        let chosen = effective_content_type(config);
        let body = match chosen {
            ContentType::Form => {
                let multipart = match &config.data {
                    Some(RequestData::Multipart(multipart)) => multipart.clone(),
                    Some(RequestData::Value(value)) => Multipart::from_value(value)?,
                    None => Multipart::new(),
                };
                WireBody::Multipart(multipart)
            }
            ContentType::Json => {
                headers.insert("content-type".to_string(), JSON.to_string());
                match &config.data {
                    Some(RequestData::Value(value)) => WireBody::Bytes(serde_json::to_vec(value)?),
                    Some(RequestData::Multipart(_)) => unreachable!("multipart forces FORM"),
                    None => WireBody::None,
                }
            }
            ContentType::Urlencoded => {
                headers.insert("content-type".to_string(), URLENCODED.to_string());
                match &config.data {
                    Some(RequestData::Value(value)) => {
                        WireBody::Bytes(urlencode(value)?.into_bytes())
                    }
                    Some(RequestData::Multipart(_)) => unreachable!("multipart forces FORM"),
                    None => WireBody::None,
                }
            }
        };
        (config.url.clone(), body)
    };

    Ok(PreparedRequest {
        method: config.method,
        url,
        headers: headers.into_iter().collect(),
        body,
    })
}

/// Caller-specified type, FORM forced by multipart-capable data, or the
/// JSON default.
fn effective_content_type(config: &RequestConfig) -> ContentType {
    match &config.data {
        Some(RequestData::Multipart(_)) => ContentType::Form,
        _ => config.content_type.unwrap_or(ContentType::Json),
    }
}

/// Folds urlencoded `data` into the URL: appended with `&` when the URL
/// already carries a query string, `?` otherwise. No data, no change.
fn fold_into_query(url: &str, data: Option<&RequestData>) -> Result<String, EncodeError> {
    let value: &Value = match data {
        None => return Ok(url.to_string()),
        Some(RequestData::Value(value)) => value,
        Some(RequestData::Multipart(_)) => return Err(EncodeError::NotAMapping("urlencoded")),
    };
    let query = urlencode(value)?;
    if query.is_empty() {
        return Ok(url.to_string());
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    Ok(format!("{url}{separator}{query}"))
}
