//! Classified request outcome.

use std::collections::HashMap;

use serde_json::Value;

use crate::transport::{parse_header_block, RawExchange};

/// Response body: parsed JSON when the payload is valid JSON, raw text
/// otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    Text(String),
}

impl Body {
    /// The parsed JSON value, if the body was JSON.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Body::Json(value) => Some(value),
            Body::Text(_) => None,
        }
    }

    /// A textual rendering of the body (compact JSON for JSON bodies).
    pub fn to_text(&self) -> String {
        match self {
            Body::Json(value) => value.to_string(),
            Body::Text(text) => text.clone(),
        }
    }
}

/// Result of a completed exchange: the server answered. Constructed once,
/// immutable, owned by the caller awaiting the request. Header names are
/// lowercased; a repeated header keeps its last value.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub body: Body,
    pub status: u16,
    pub headers: HashMap<String, String>,
}

impl Response {
    /// Status classification: codes in [200, 300) are success.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub(crate) fn from_raw(raw: RawExchange) -> Self {
        let body = match serde_json::from_slice::<Value>(&raw.body) {
            Ok(value) => Body::Json(value),
            Err(_) => Body::Text(String::from_utf8_lossy(&raw.body).into_owned()),
        };
        Response {
            body,
            status: raw.status,
            headers: parse_header_block(&raw.header_lines),
        }
    }
}
