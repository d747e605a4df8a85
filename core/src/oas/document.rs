#![deny(missing_docs)]

//! # Bundled Document
//!
//! A self-contained OpenAPI document produced by the loader. It owns the raw JSON
//! tree, answers pointer lookups and exposes the named component schemas.
//! The resolution engine only ever reads from it.

use crate::error::{AppError, AppResult};
use crate::oas::loader::{component_schema_pointer, DocumentLoader};
use crate::oas::ref_utils::{as_reference, resolve_local_ref, split_reference};
use serde_json::Value;

/// A bundled document in which every `$ref` is local and resolvable.
#[derive(Debug, Clone)]
pub struct BundledDocument {
    uri: String,
    root: Value,
}

impl BundledDocument {
    /// Wraps an already bundled tree, checking that every reference resolves.
    pub fn new(uri: impl Into<String>, root: Value) -> AppResult<Self> {
        let doc = Self {
            uri: uri.into(),
            root,
        };
        doc.check_references(&doc.root)?;
        Ok(doc)
    }

    /// Parses and bundles a single in-memory YAML/JSON document.
    ///
    /// The document has no file location, so external references fail to resolve;
    /// use a [`DocumentLoader`] to register the documents they point at.
    pub fn from_yaml_str(yaml: &str) -> AppResult<Self> {
        let mut loader = DocumentLoader::new();
        loader.register_yaml("openapi.yaml", yaml)?;
        loader.bundle("openapi.yaml")
    }

    /// URI of the root document.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The raw bundled tree.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Resolves a same-document reference such as `#/components/schemas/User`.
    pub fn resolve(&self, ref_str: &str) -> Option<&Value> {
        resolve_local_ref(&self.root, ref_str)
    }

    /// Follows `$ref` chains starting at `value` until a non-reference value is reached.
    ///
    /// Returns `None` for cycles made only of references.
    pub fn deref<'a>(&'a self, mut value: &'a Value) -> Option<&'a Value> {
        let mut seen = Vec::new();
        while let Some(ref_str) = as_reference(value) {
            if seen.contains(&ref_str) {
                return None;
            }
            seen.push(ref_str);
            value = self.resolve(ref_str)?;
        }
        Some(value)
    }

    /// Named component schemas in declaration order.
    pub fn schemas(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.root
            .pointer("/components/schemas")
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|schemas| schemas.iter().map(|(name, schema)| (name.as_str(), schema)))
    }

    /// Looks up a component schema by name.
    pub fn schema(&self, name: &str) -> Option<&Value> {
        self.resolve(&component_schema_pointer(name))
    }

    /// The `paths` object, if present.
    pub fn paths(&self) -> Option<&serde_json::Map<String, Value>> {
        self.root.get("paths").and_then(Value::as_object)
    }

    fn check_references(&self, value: &Value) -> AppResult<()> {
        match value {
            Value::Object(map) => {
                if let Some(ref_str) = as_reference(value) {
                    let local = split_reference(ref_str).is_local();
                    if !local || self.resolve(ref_str).is_none() {
                        return Err(AppError::UnresolvedReference {
                            reference: ref_str.to_string(),
                            base: self.uri.clone(),
                        });
                    }
                }
                map.values().try_for_each(|v| self.check_references(v))
            }
            Value::Array(items) => items.iter().try_for_each(|v| self.check_references(v)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schemas_keep_declaration_order() {
        let doc = BundledDocument::new(
            "mem://doc",
            json!({
                "openapi": "3.0.0",
                "components": { "schemas": {
                    "Zebra": { "type": "string" },
                    "Apple": { "type": "integer" },
                    "Mango": { "$ref": "#/components/schemas/Apple" }
                }}
            }),
        )
        .unwrap();
        let names: Vec<&str> = doc.schemas().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Zebra", "Apple", "Mango"]);
        assert_eq!(doc.schema("Apple"), Some(&json!({"type": "integer"})));
    }

    #[test]
    fn test_deref_follows_chains() {
        let doc = BundledDocument::new(
            "mem://doc",
            json!({
                "components": { "schemas": {
                    "A": { "$ref": "#/components/schemas/B" },
                    "B": { "$ref": "#/components/schemas/C" },
                    "C": { "type": "boolean" }
                }}
            }),
        )
        .unwrap();
        let a = doc.schema("A").unwrap();
        assert_eq!(doc.deref(a), Some(&json!({"type": "boolean"})));
    }

    #[test]
    fn test_deref_reference_only_cycle() {
        let doc = BundledDocument::new(
            "mem://doc",
            json!({
                "components": { "schemas": {
                    "A": { "$ref": "#/components/schemas/B" },
                    "B": { "$ref": "#/components/schemas/A" }
                }}
            }),
        )
        .unwrap();
        assert_eq!(doc.deref(doc.schema("A").unwrap()), None);
    }

    #[test]
    fn test_external_reference_rejected() {
        let err = BundledDocument::new(
            "mem://doc",
            json!({ "components": { "schemas": { "A": { "$ref": "other.yaml#/X" } } } }),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::UnresolvedReference { .. }));
    }
}
