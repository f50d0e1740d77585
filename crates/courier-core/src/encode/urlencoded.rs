//! Percent-encoded `key=value&key=value` payloads.
//!
//! Nested structures are flattened with the bracket convention:
//! `{"user": {"name": "x"}}` becomes `user[name]=x` and
//! `{"tags": ["a", "b"]}` becomes `tags[0]=a&tags[1]=b`. The matching
//! `urldecode` rebuilds the nesting and is what the round-trip tests use.

use serde_json::{Map, Value};
use url::form_urlencoded;

use super::EncodeError;

/// Encodes a JSON mapping as an urlencoded string. Keys and values are
/// percent-encoded individually; `Null` or an empty mapping yields an
/// empty string.
pub fn urlencode(data: &Value) -> Result<String, EncodeError> {
    let map = match data {
        Value::Null => return Ok(String::new()),
        Value::Object(map) => map,
        _ => return Err(EncodeError::NotAMapping("urlencoded")),
    };

    let mut pairs: Vec<(String, String)> = Vec::new();
    for (key, value) in map {
        flatten(key, value, &mut pairs);
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in &pairs {
        serializer.append_pair(key, value);
    }
    Ok(serializer.finish())
}

/// Decodes an urlencoded string back into a JSON mapping with string leaves,
/// reversing the bracket convention used by [`urlencode`].
pub fn urldecode(input: &str) -> Value {
    let mut root = Value::Object(Map::new());
    for (key, value) in form_urlencoded::parse(input.as_bytes()) {
        let path = split_key(&key);
        insert(&mut root, &path, value.into_owned());
    }
    root
}

fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, inner) in map {
                flatten(&format!("{prefix}[{key}]"), inner, out);
            }
        }
        Value::Array(items) => {
            for (index, inner) in items.iter().enumerate() {
                flatten(&format!("{prefix}[{index}]"), inner, out);
            }
        }
        Value::Null => out.push((prefix.to_string(), String::new())),
        Value::Bool(flag) => out.push((prefix.to_string(), flag.to_string())),
        Value::Number(number) => out.push((prefix.to_string(), number.to_string())),
        Value::String(text) => out.push((prefix.to_string(), text.clone())),
    }
}

/// `a[b][0]` -> `["a", "b", "0"]`. A key with no brackets is a single segment.
fn split_key(key: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut rest = key;
    if let Some(open) = rest.find('[') {
        segments.push(rest[..open].to_string());
        rest = &rest[open..];
        while let Some(close) = rest.find(']') {
            segments.push(rest[1..close].to_string());
            rest = &rest[close + 1..];
            if !rest.starts_with('[') {
                break;
            }
        }
    } else {
        segments.push(rest.to_string());
    }
    segments
}

fn insert(node: &mut Value, path: &[String], leaf: String) {
    let Some((head, tail)) = path.split_first() else {
        return;
    };
    if tail.is_empty() {
        set_child(node, head, Value::String(leaf));
        return;
    }
    // Numeric next segment means the child container is an array.
    let next_is_index = tail[0].bytes().all(|b| b.is_ascii_digit()) && !tail[0].is_empty();
    let child = child_entry(node, head, next_is_index);
    insert(child, tail, leaf);
}

fn set_child(node: &mut Value, segment: &str, value: Value) {
    match node {
        Value::Object(map) => {
            map.insert(segment.to_string(), value);
        }
        Value::Array(items) => {
            if let Ok(index) = segment.parse::<usize>() {
                if items.len() <= index {
                    items.resize(index + 1, Value::Null);
                }
                items[index] = value;
            }
        }
        _ => {}
    }
}

fn child_entry<'a>(node: &'a mut Value, segment: &str, next_is_index: bool) -> &'a mut Value {
    let empty = || {
        if next_is_index {
            Value::Array(Vec::new())
        } else {
            Value::Object(Map::new())
        }
    };
    match node {
        Value::Object(map) => map.entry(segment.to_string()).or_insert_with(empty),
        Value::Array(items) => {
            let index = segment.parse::<usize>().unwrap_or(0);
            if items.len() <= index {
                items.resize(index + 1, Value::Null);
            }
            if items[index].is_null() {
                items[index] = empty();
            }
            &mut items[index]
        }
        other => {
            *other = empty();
            child_entry(other, segment, next_is_index)
        }
    }
}
