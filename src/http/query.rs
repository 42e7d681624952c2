//! Query string parsing
//!
//! Values are percent-decoded exactly once. A value that was encoded twice
//! therefore still carries its `%` escapes after decoding.

use std::borrow::Cow;

/// Look up `name` in a raw query string.
///
/// `+` decodes to a space. When a key repeats, the last value wins.
pub fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    query?
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key) == name).then(|| decode(value))
        })
        .last()
}

fn decode(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    urlencoding::decode(&raw).map_or_else(
        |_| String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned(),
        Cow::into_owned,
    )
}
