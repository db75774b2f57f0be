//! Dot-path lookups into parsed JSON
//!
//! Paths look like `sidebar.playlistSidebarRenderer.items.0.title`: object
//! keys separated by dots, with numeric segments indexing into arrays.

use crate::error::{Error, Result};
use serde_json::Value;

/// Walk `path` from `value`, returning `None` on the first miss
pub fn find<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    lookup(value, path).ok()
}

/// Walk `path` from `value`
///
/// The error names the full path and the segment that was missing.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Result<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() {
        return Ok(value);
    }

    let mut current = value;
    for part in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(part),
            Value::Array(items) => part.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
        .ok_or_else(|| Error::extraction(path, format!("missing segment '{part}'")))?;
    }
    Ok(current)
}

/// Walk `path` and require a string at the end
pub fn lookup_str<'a>(value: &'a Value, path: &str) -> Result<&'a str> {
    lookup(value, path)?
        .as_str()
        .ok_or_else(|| Error::extraction(path, "expected a string"))
}

/// Walk `path` and require an array at the end
pub fn lookup_array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>> {
    lookup(value, path)?
        .as_array()
        .ok_or_else(|| Error::extraction(path, "expected an array"))
}

/// Parse a display count such as `"1,234,567 views"` or `"42 videos"`
///
/// Takes the first whitespace-separated word and drops thousands separators.
pub fn parse_count(text: &str) -> Result<u64> {
    let word = text.split_whitespace().next().unwrap_or_default();
    word.replace(',', "")
        .parse()
        .map_err(|_| Error::invalid_number(text))
}
