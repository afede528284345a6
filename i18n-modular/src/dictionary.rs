//! Dictionary key partitioning and dictionary path handling.
//!
//! A dictionary file mixes two kinds of keys: *generated* keys are valid
//! module identifiers and belong to the engine, which overwrites them on
//! every build; *seed* keys are everything else, authored by humans or an
//! external translation tool, and are only ever read and carried over.

use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::Error;
use crate::id::ID_PREFIX;

/// Placeholder in a dictionary pattern that stands for the language tag.
pub const LOCALE_PLACEHOLDER: &str = "[locale_code]";

const LOCALE_PATTERN: &str = "([a-z]{2,3}-[A-Z]{2,3})";

lazy_static! {
    static ref STRICT_LOCALE_REGEX: Regex = Regex::new(&format!("^{}$", LOCALE_PATTERN)).unwrap();
}

/// Returns true if `key` is a module identifier owned by the engine.
pub fn is_generated_key(key: &str) -> bool {
    key.starts_with(ID_PREFIX)
}

/// Returns true if `key` is a well-formed language tag such as `en-US`.
pub fn is_language_key(key: &str) -> bool {
    STRICT_LOCALE_REGEX.is_match(key)
}

/// The subset of `dictionary` that is not engine-owned.
pub fn seed_entries(dictionary: &Map<String, Value>) -> Map<String, Value> {
    dictionary
        .iter()
        .filter(|(key, _)| !is_generated_key(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// The subset of `dictionary` that is engine-owned.
pub fn generated_entries(dictionary: &Map<String, Value>) -> Map<String, Value> {
    dictionary
        .iter()
        .filter(|(key, _)| is_generated_key(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Resolves a dictionary pattern to the concrete file path for `language`.
pub fn dictionary_path(pattern: &Path, language: &str) -> PathBuf {
    PathBuf::from(
        pattern
            .to_string_lossy()
            .replace(LOCALE_PLACEHOLDER, language),
    )
}

/// Builds a matcher for concrete dictionary paths out of the pattern, with
/// the language tag as the single capture group.
pub fn dictionary_regex(pattern: &Path) -> Result<Regex, Error> {
    let pattern = pattern.to_string_lossy();
    if !pattern.contains(LOCALE_PLACEHOLDER) {
        return Err(Error::InvalidPattern(pattern.into_owned()));
    }

    let escaped = regex::escape(&pattern).replace(&regex::escape(LOCALE_PLACEHOLDER), LOCALE_PATTERN);
    Regex::new(&format!("{}$", escaped)).map_err(|_| Error::InvalidPattern(pattern.into_owned()))
}
