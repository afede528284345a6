//! Module file reading and writing.
//!
//! A module file is a JSON object whose top-level keys are language tags and
//! whose values are arbitrarily nested trees of strings. Trees are deep-sorted
//! on read so every consumer (dictionary builds, bundler content hashing) sees
//! one canonical byte representation.

use std::path::Path;

use serde_json::{Map, Value};

use crate::dictionary::is_language_key;
use crate::error::Error;
use crate::sort::deep_sorted_value;

/// Parses a module file's raw content into its per-language translation map.
///
/// The result is deep-sorted. Every top-level key must be a language tag
/// (`en-US` shape); the first violation fails the whole read, naming `path`
/// and the offending key.
pub fn read_module(raw: &str, path: &Path) -> Result<Map<String, Value>, Error> {
    let parsed: Map<String, Value> =
        serde_json::from_str(raw).map_err(|source| Error::parse_error(path, source))?;

    let data = match deep_sorted_value(&Value::Object(parsed)) {
        Value::Object(map) => map,
        _ => unreachable!("deep sort preserves the value kind"),
    };

    for key in data.keys() {
        if !is_language_key(key) {
            return Err(Error::validation_error(path, key));
        }
    }

    Ok(data)
}

/// Serializes one language's translation tree as 2-space-indented JSON.
///
/// Key order is whatever the tree carries; trees coming out of
/// [`read_module`] or the sync engine are already canonically sorted.
pub fn write_language_tree(tree: &Value) -> Result<String, Error> {
    serde_json::to_string_pretty(tree).map_err(|source| Error::parse_error("<serialize>", source))
}
