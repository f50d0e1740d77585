//! Parameter validation and defaulting.
//!
//! Pure transformation from the loose [`RequestParams`] into the immutable
//! [`RequestConfig`]; each rule is checked independently, in data-model
//! field order, and failure names the offending field.

use std::sync::Arc;

use thiserror::Error;

use super::{Method, RequestConfig, RequestParams};
use crate::encode::ContentType;

/// Default share of the progress scale given to the upload phase.
pub const DEFAULT_UPLOAD_RATIO: u8 = 90;

/// Default MIME pattern for file selection: any file.
pub const DEFAULT_ACCEPT: &str = "*/*";

/// Default multipart field name for selected files.
pub const DEFAULT_FIELD_NAME: &str = "files";

/// Rejected caller configuration. Detected synchronously; a request that
/// fails validation never reaches the network.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("`url` must be a non-empty string")]
    Url,
    #[error("`method` must be a known HTTP verb")]
    Method,
    #[error("`content_type` must be one of the recognized wire values")]
    ContentType,
    #[error("`upload_ratio` must be in a 0-100 interval")]
    UploadRatio,
}

impl ValidationError {
    /// Name of the offending configuration field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Url => "url",
            ValidationError::Method => "method",
            ValidationError::ContentType => "content_type",
            ValidationError::UploadRatio => "upload_ratio",
        }
    }
}

/// Checks `params` and fills defaults, producing a fully-typed config.
///
/// Idempotent: validating the params derived from an already-validated
/// config yields the same config.
pub fn validate(params: &RequestParams) -> Result<RequestConfig, ValidationError> {
    let url = match params.url.as_deref() {
        Some(url) if !url.trim().is_empty() => url.to_string(),
        _ => return Err(ValidationError::Url),
    };

    let method = match params.method.as_deref() {
        None => Method::Get,
        Some(name) => Method::parse(name).ok_or(ValidationError::Method)?,
    };

    let headers = params.headers.clone().unwrap_or_default();

    let content_type = match params.content_type.as_deref() {
        None => None,
        Some(value) => Some(ContentType::from_mime(value).ok_or(ValidationError::ContentType)?),
    };

    let progress = params
        .progress
        .clone()
        .unwrap_or_else(|| Arc::new(|_| {}));

    let upload_ratio = match params.upload_ratio {
        None => DEFAULT_UPLOAD_RATIO,
        Some(ratio) if (0..=100).contains(&ratio) => ratio as u8,
        Some(_) => return Err(ValidationError::UploadRatio),
    };

    let accept = params
        .accept
        .clone()
        .unwrap_or_else(|| DEFAULT_ACCEPT.to_string());

    let multiple = params.multiple.unwrap_or(false);

    let field_name = params
        .field_name
        .clone()
        .unwrap_or_else(|| DEFAULT_FIELD_NAME.to_string());

    Ok(RequestConfig {
        url,
        method,
        headers,
        data: params.data.clone(),
        content_type,
        progress,
        upload_ratio,
        accept,
        multiple,
        field_name,
        before_send: params.before_send.clone(),
    })
}
