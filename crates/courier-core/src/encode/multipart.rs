//! Multipart-capable payload container.
//!
//! `Multipart` holds named text and file parts in append order. It is the
//! library's stand-in for the browser `FormData` object: a payload that is
//! already multipart-capable passes through the encoder unchanged, and
//! supplying one forces the `multipart/form-data` content type. The
//! transport converts it into a curl form at send time.

use serde_json::Value;

use super::EncodeError;

/// One named part of a multipart payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        filename: String,
        mime: String,
        data: Vec<u8>,
    },
}

impl Part {
    /// Field name this part is appended under.
    pub fn name(&self) -> &str {
        match self {
            Part::Text { name, .. } | Part::File { name, .. } => name,
        }
    }
}

/// Ordered collection of multipart parts. Field names are not required to
/// be unique; appending a duplicate name keeps both parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Multipart {
    parts: Vec<Part>,
}

impl Multipart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parts.push(Part::Text {
            name: name.into(),
            value: value.into(),
        });
    }

    pub fn append_file(
        &mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        mime: impl Into<String>,
        data: Vec<u8>,
    ) {
        self.parts.push(Part::File {
            name: name.into(),
            filename: filename.into(),
            mime: mime.into(),
            data,
        });
    }

    pub fn append_part(&mut self, part: Part) {
        self.parts.push(part);
    }

    /// Builds a container from a plain JSON mapping, appending each pair in
    /// iteration order. Scalar values keep their string form; nested values
    /// are appended as compact JSON text.
    pub fn from_value(data: &Value) -> Result<Self, EncodeError> {
        let mut multipart = Self::new();
        multipart.append_value_fields(data)?;
        Ok(multipart)
    }

    /// Appends each pair of a JSON mapping as a text part. Same-named
    /// fields are appended, not overwritten.
    pub fn append_value_fields(&mut self, data: &Value) -> Result<(), EncodeError> {
        let map = match data {
            Value::Null => return Ok(()),
            Value::Object(map) => map,
            _ => return Err(EncodeError::NotAMapping("form")),
        };
        for (key, value) in map {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                nested => nested.to_string(),
            };
            self.append_text(key, text);
        }
        Ok(())
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
