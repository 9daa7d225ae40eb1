//! Parse raw HTTP response header lines into a header map.

use std::collections::HashMap;

/// Collect `Name: value` lines into a map keyed by lower-cased name.
///
/// The status line and blank separators are skipped. When a header repeats,
/// or a redirect produces several header blocks, the last value wins.
pub(crate) fn parse_headers(lines: &[String]) -> HashMap<String, String> {
    let mut headers = HashMap::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with("HTTP/") {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            headers.insert(name.to_ascii_lowercase(), value.trim().to_string());
        }
    }
    headers
}
