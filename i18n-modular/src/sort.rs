//! Canonical key ordering for all emitted JSON.
//!
//! Dictionaries are diffed by humans and hashed by bundlers, so the same
//! logical data has to serialize to the same bytes no matter which order the
//! keys were discovered in. Platform default collations disagree on where
//! punctuation and `_` land relative to alphanumerics, so the order is pinned
//! here instead: word characters before special characters, then a
//! case-insensitive comparison with lowercase winning ties.

use std::cmp::Ordering;

use serde_json::{Map, Value};

fn is_special(c: char) -> bool {
    // `_` counts as special so that `abc` sorts before `ab_c`.
    !c.is_ascii_alphanumeric()
}

fn cmp_chars(a: char, b: char) -> Ordering {
    a.to_ascii_lowercase()
        .cmp(&b.to_ascii_lowercase())
        .then_with(|| a.is_ascii_uppercase().cmp(&b.is_ascii_uppercase()))
        .then_with(|| a.cmp(&b))
}

/// Compares two keys in the pinned canonical order.
///
/// Walks both strings character by character: a string that runs out first
/// sorts first, a special character loses to a word character at the first
/// differing position, and otherwise the characters are compared
/// case-insensitively with lowercase before uppercase.
pub fn canonical_cmp(a: &str, b: &str) -> Ordering {
    let mut chars_a = a.chars();
    let mut chars_b = b.chars();

    loop {
        let (char_a, char_b) = match (chars_a.next(), chars_b.next()) {
            (None, None) => return Ordering::Equal,
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (Some(char_a), Some(char_b)) => (char_a, char_b),
        };

        if char_a == char_b {
            continue;
        }

        match (is_special(char_a), is_special(char_b)) {
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            _ => return cmp_chars(char_a, char_b),
        }
    }
}

/// Returns a copy of `map` with its keys in canonical order.
///
/// Values are carried over untouched; use [`deep_sorted_value`] when nested
/// objects need the same treatment.
pub fn sorted_map(map: &Map<String, Value>) -> Map<String, Value> {
    sort_map(map, false)
}

/// Recursively sorts every object in `value`, leaving non-object leaves as-is.
pub fn deep_sorted_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(sort_map(map, true)),
        other => other.clone(),
    }
}

fn sort_map(map: &Map<String, Value>, recursive: bool) -> Map<String, Value> {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort_by(|a, b| canonical_cmp(a, b));

    keys.into_iter()
        .map(|key| {
            let value = &map[key];
            let value = if recursive {
                deep_sorted_value(value)
            } else {
                value.clone()
            };
            (key.clone(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sorted_keys(value: &Value) -> Vec<String> {
        value
            .as_object()
            .expect("object")
            .keys()
            .cloned()
            .collect()
    }

    #[test]
    fn test_underscore_sorts_after_letters() {
        let mut keys = vec!["a_1", "ab_c", "a", "abc_1", "a_b", "abc"];
        keys.sort_by(|a, b| canonical_cmp(a, b));
        assert_eq!(keys, vec!["a", "abc", "abc_1", "ab_c", "a_1", "a_b"]);
    }

    #[test]
    fn test_shorter_string_sorts_first() {
        assert_eq!(canonical_cmp("ab", "abc"), Ordering::Less);
        assert_eq!(canonical_cmp("abc", "ab"), Ordering::Greater);
        assert_eq!(canonical_cmp("abc", "abc"), Ordering::Equal);
    }

    #[test]
    fn test_lowercase_before_uppercase() {
        assert_eq!(canonical_cmp("a", "B"), Ordering::Less);
        assert_eq!(canonical_cmp("a", "A"), Ordering::Less);
        assert_eq!(canonical_cmp("B", "a"), Ordering::Greater);
    }

    #[test]
    fn test_shallow_sort_leaves_nested_objects_alone() {
        let source = json!({ "b": { "z": 1, "a": 1 }, "a": 1 });
        let sorted = Value::Object(sorted_map(source.as_object().unwrap()));
        assert_eq!(sorted_keys(&sorted), vec!["a", "b"]);
        assert_eq!(sorted_keys(&sorted["b"]), vec!["z", "a"]);
    }

    #[test]
    fn test_deep_sort_recurses_into_objects() {
        let source = json!({
            "deep": { "a": 1, "a_b": 1, "ab_c": 1, "abc": 1 },
            "a": 1,
            "a_b": 1,
            "ab_c": 1,
            "abc": 1
        });

        let sorted = deep_sorted_value(&source);
        assert_eq!(
            sorted_keys(&sorted),
            vec!["a", "abc", "ab_c", "a_b", "deep"]
        );
        assert_eq!(sorted_keys(&sorted["deep"]), vec!["a", "abc", "ab_c", "a_b"]);
    }

    #[test]
    fn test_deep_sort_leaves_non_objects_untouched() {
        assert_eq!(deep_sorted_value(&json!("text")), json!("text"));
        assert_eq!(deep_sorted_value(&json!([3, 1, 2])), json!([3, 1, 2]));
        assert_eq!(deep_sorted_value(&json!(null)), json!(null));
    }
}
