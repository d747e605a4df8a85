#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Shared helpers for splitting `$ref` strings and walking JSON Pointers.
//!
//! These helpers never fetch documents; fetching and bundling live in the loader.

use percent_encoding::percent_decode_str;
use serde_json::Value;

/// A `$ref` split into its document part and its fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReferenceParts<'a> {
    /// Document part (empty for same-document references).
    pub document: &'a str,
    /// JSON Pointer fragment without the leading `#`, if any.
    pub fragment: Option<&'a str>,
}

impl ReferenceParts<'_> {
    /// Whether the reference targets the current document.
    pub fn is_local(&self) -> bool {
        self.document.is_empty()
    }
}

/// Splits a reference like `common.yaml#/components/schemas/Id`.
pub(crate) fn split_reference(ref_str: &str) -> ReferenceParts<'_> {
    match ref_str.split_once('#') {
        Some((document, fragment)) => ReferenceParts {
            document,
            fragment: Some(fragment),
        },
        None => ReferenceParts {
            document: ref_str,
            fragment: None,
        },
    }
}

/// Decodes a JSON Pointer segment (handles `~1`, `~0` and percent-encoding).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = percent_decode_str(segment).decode_utf8_lossy();
    decoded.replace("~1", "/").replace("~0", "~")
}

/// Encodes a key so it can be used as a JSON Pointer segment.
pub(crate) fn encode_pointer_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Appends an (unencoded) key to a pointer fragment.
pub(crate) fn join_pointer(pointer: &str, key: &str) -> String {
    format!("{}/{}", pointer, encode_pointer_segment(key))
}

/// Extracts the type name a reference designates: its decoded trailing segment.
///
/// e.g. `#/components/schemas/User` -> `User`
pub(crate) fn ref_type_name(ref_str: &str) -> String {
    let pointer = split_reference(ref_str).fragment.unwrap_or(ref_str);
    pointer
        .rsplit('/')
        .next()
        .map(decode_pointer_segment)
        .unwrap_or_default()
}

/// Walks a JSON Pointer fragment (without `#`) from `root`.
///
/// An empty fragment designates the root itself.
pub(crate) fn resolve_pointer<'a>(root: &'a Value, fragment: &str) -> Option<&'a Value> {
    if fragment.is_empty() || fragment == "/" {
        return Some(root);
    }
    let rest = fragment.strip_prefix('/')?;

    let mut current = root;
    for raw in rest.split('/') {
        let segment = decode_pointer_segment(raw);
        current = match current {
            Value::Object(map) => map.get(&segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Resolves a same-document `$ref` (e.g. `#/components/schemas/User`) against `root`.
pub(crate) fn resolve_local_ref<'a>(root: &'a Value, ref_str: &str) -> Option<&'a Value> {
    let parts = split_reference(ref_str);
    if !parts.is_local() {
        return None;
    }
    resolve_pointer(root, parts.fragment.unwrap_or(""))
}

/// Returns the `$ref` string of an object value, if it is a Reference Object.
pub(crate) fn as_reference(value: &Value) -> Option<&str> {
    value.get("$ref").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_reference() {
        let local = split_reference("#/components/schemas/User");
        assert!(local.is_local());
        assert_eq!(local.fragment, Some("/components/schemas/User"));

        let external = split_reference("common.yaml#/components/schemas/Id");
        assert_eq!(external.document, "common.yaml");
        assert_eq!(external.fragment, Some("/components/schemas/Id"));

        let whole = split_reference("schemas/Pet.yaml");
        assert_eq!(whole.document, "schemas/Pet.yaml");
        assert_eq!(whole.fragment, None);
    }

    #[test]
    fn test_decode_pointer_segment_percent_encoding() {
        assert_eq!(
            decode_pointer_segment("User%20Profile~1details"),
            "User Profile/details"
        );
        assert_eq!(decode_pointer_segment("a~0b"), "a~b");
    }

    #[test]
    fn test_ref_type_name() {
        assert_eq!(ref_type_name("#/components/schemas/User"), "User");
        assert_eq!(ref_type_name("#/components/schemas/a~1b"), "a/b");
    }

    #[test]
    fn test_resolve_pointer() {
        let doc = json!({
            "paths": { "/users/{id}": { "get": { "tags": ["a", "b"] } } }
        });
        let tags = resolve_pointer(&doc, "/paths/~1users~1{id}/get/tags/1").unwrap();
        assert_eq!(tags, &json!("b"));
        assert!(resolve_pointer(&doc, "/paths/missing").is_none());
        assert_eq!(resolve_pointer(&doc, ""), Some(&doc));
    }

    #[test]
    fn test_join_pointer_round_trips_through_resolve() {
        let doc = json!({ "paths": { "/pets": { "x": 1 } } });
        let pointer = join_pointer(&join_pointer("", "paths"), "/pets");
        assert_eq!(pointer, "/paths/~1pets");
        assert_eq!(resolve_pointer(&doc, &pointer).unwrap()["x"], json!(1));
    }
}
