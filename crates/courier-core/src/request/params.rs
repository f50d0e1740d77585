//! Loose caller-facing request description.
//!
//! Every field is optional; `validate` turns this into the fully-defaulted
//! [`RequestConfig`](super::RequestConfig) or fails naming the bad field.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::encode::Multipart;
use crate::picker::SelectedFile;
use crate::progress::ProgressFn;

/// Hook invoked with the selected files after file choice, before the
/// upload request is sent. May be used to update UI state.
pub type BeforeSendFn = Arc<dyn Fn(&[SelectedFile]) + Send + Sync>;

/// Raw payload attached to a request.
#[derive(Debug, Clone)]
pub enum RequestData {
    /// A JSON value; mappings encode to urlencoded/JSON/form fields.
    Value(Value),
    /// An already multipart-capable container; forces the FORM content type.
    Multipart(Multipart),
}

impl From<Value> for RequestData {
    fn from(value: Value) -> Self {
        RequestData::Value(value)
    }
}

impl From<Multipart> for RequestData {
    fn from(multipart: Multipart) -> Self {
        RequestData::Multipart(multipart)
    }
}

/// Partial request configuration as supplied by the caller.
#[derive(Clone, Default)]
pub struct RequestParams {
    pub url: Option<String>,
    /// HTTP verb name, any case. Defaults to GET.
    pub method: Option<String>,
    pub headers: Option<HashMap<String, String>>,
    pub data: Option<RequestData>,
    /// One of the recognized wire content-type values.
    pub content_type: Option<String>,
    /// Receives blended 0-100 percentages.
    pub progress: Option<ProgressFn>,
    /// Share of the progress scale allotted to the upload phase. 0 is a
    /// valid boundary value, distinct from unset.
    pub upload_ratio: Option<i64>,
    /// MIME pattern for file selection, e.g. `"image/*"`.
    pub accept: Option<String>,
    pub multiple: Option<bool>,
    /// Multipart field name for selected files.
    pub field_name: Option<String>,
    pub before_send: Option<BeforeSendFn>,
}

impl RequestParams {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_data(mut self, data: impl Into<RequestData>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_progress(mut self, progress: ProgressFn) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_upload_ratio(mut self, ratio: i64) -> Self {
        self.upload_ratio = Some(ratio);
        self
    }

    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = Some(multiple);
        self
    }

    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    pub fn with_before_send(mut self, hook: BeforeSendFn) -> Self {
        self.before_send = Some(hook);
        self
    }
}

impl fmt::Debug for RequestParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestParams")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("data", &self.data)
            .field("content_type", &self.content_type)
            .field("progress", &self.progress.as_ref().map(|_| "Fn(u8)"))
            .field("upload_ratio", &self.upload_ratio)
            .field("accept", &self.accept)
            .field("multiple", &self.multiple)
            .field("field_name", &self.field_name)
            .field("before_send", &self.before_send.as_ref().map(|_| "Fn(&[SelectedFile])"))
            .finish()
    }
}
