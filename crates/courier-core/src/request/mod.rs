//! Request description types: loose caller params, the validated config,
//! and the HTTP verb enum.

mod params;
mod validate;

pub use params::{BeforeSendFn, RequestData, RequestParams};
pub use validate::{
    validate, ValidationError, DEFAULT_ACCEPT, DEFAULT_FIELD_NAME, DEFAULT_UPLOAD_RATIO,
};

use std::collections::HashMap;
use std::fmt;

use crate::encode::ContentType;
use crate::progress::ProgressFn;

/// HTTP verb, stored in its uppercased wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl Method {
    /// Parses a verb name case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            "PUT" => Some(Method::Put),
            "DELETE" => Some(Method::Delete),
            "PATCH" => Some(Method::Patch),
            "HEAD" => Some(Method::Head),
            "OPTIONS" => Some(Method::Options),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully-defaulted, internally consistent request description produced by
/// [`validate`]. Immutable once built; encoding and transport only read it.
#[derive(Clone)]
pub struct RequestConfig {
    pub url: String,
    pub method: Method,
    pub headers: HashMap<String, String>,
    pub data: Option<RequestData>,
    /// Caller-chosen content type; `None` means auto-selection.
    pub content_type: Option<ContentType>,
    pub progress: ProgressFn,
    pub upload_ratio: u8,
    pub accept: String,
    pub multiple: bool,
    pub field_name: String,
    pub before_send: Option<BeforeSendFn>,
}

impl fmt::Debug for RequestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestConfig")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("data", &self.data)
            .field("content_type", &self.content_type)
            .field("upload_ratio", &self.upload_ratio)
            .field("accept", &self.accept)
            .field("multiple", &self.multiple)
            .field("field_name", &self.field_name)
            .finish_non_exhaustive()
    }
}

/// A validated config can be turned back into params, e.g. to adjust one
/// field and re-issue. Re-validating the result yields an equal config.
impl From<RequestConfig> for RequestParams {
    fn from(config: RequestConfig) -> Self {
        RequestParams {
            url: Some(config.url),
            method: Some(config.method.as_str().to_string()),
            headers: Some(config.headers),
            data: config.data,
            content_type: config.content_type.map(|ct| ct.as_mime().to_string()),
            progress: Some(config.progress),
            upload_ratio: Some(i64::from(config.upload_ratio)),
            accept: Some(config.accept),
            multiple: Some(config.multiple),
            field_name: Some(config.field_name),
            before_send: config.before_send,
        }
    }
}
