//! Parse raw response header lines into a name/value map.

use std::collections::HashMap;

/// Parses the newline-delimited `"name: value"` block collected from the
/// transport. Each line is split on the first `:`; names are lowercased
/// and both sides trimmed. Status lines and blanks are skipped; a repeated
/// name keeps the last value.
pub(crate) fn parse_header_block(lines: &[String]) -> HashMap<String, String> {
    let mut headers = HashMap::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with("HTTP/") {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }
    headers
}
