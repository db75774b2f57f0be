//! Locating JSON blobs embedded in page HTML
//!
//! Playlist pages carry their data as JavaScript assignments, e.g.
//! `var ytInitialData = {...};` and `ytcfg.set({...});`. These helpers find
//! the assignment, cut out the object literal with a brace scan, and parse it.

use crate::error::{Error, Result};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::debug;

static INITIAL_DATA_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r#"window\[['"]ytInitialData['"]]\s*=\s*"#).unwrap(),
        Regex::new(r"ytInitialData\s*=\s*").unwrap(),
    ]
});

static YTCFG_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"ytcfg\s=\s").unwrap(),
        Regex::new(r"ytcfg\.set\(\s*").unwrap(),
    ]
});

/// Extract the `ytInitialData` object from page HTML
pub fn initial_data(html: &str) -> Result<Value> {
    for pattern in INITIAL_DATA_PATTERNS.iter() {
        for m in pattern.find_iter(html) {
            let Some(object) = object_at(html, m.end()) else {
                continue;
            };
            match serde_json::from_str::<Value>(object) {
                Ok(value) => return Ok(value),
                Err(e) => debug!("Skipping unparsable ytInitialData candidate: {e}"),
            }
        }
    }
    Err(Error::missing_initial_data("ytInitialData"))
}

/// Extract and merge every `ytcfg` object from page HTML
///
/// Pages call `ytcfg.set` several times; later keys overwrite earlier ones.
pub fn ytcfg(html: &str) -> Result<Value> {
    let mut merged = Map::new();
    let mut found = false;

    for pattern in YTCFG_PATTERNS.iter() {
        for m in pattern.find_iter(html) {
            let Some(object) = object_at(html, m.end()) else {
                continue;
            };
            if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(object) {
                found = true;
                merged.extend(map);
            }
        }
    }

    if found {
        Ok(Value::Object(merged))
    } else {
        Err(Error::missing_initial_data("ytcfg"))
    }
}

/// Slice out the object literal starting at `start`
///
/// Returns `None` when `start` is not `{` or the braces never balance.
pub fn object_at(text: &str, start: usize) -> Option<&str> {
    let bytes = text.as_bytes();
    if bytes.get(start) != Some(&b'{') {
        return None;
    }

    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == q {
                quote = None;
            }
            continue;
        }

        match byte {
            b'"' | b'\'' => quote = Some(byte),
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}
