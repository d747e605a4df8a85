#![deny(missing_docs)]

//! # Document Loader
//!
//! Stores OpenAPI / JSON Schema documents by URI and bundles a root document and
//! everything it references into one self-contained [`BundledDocument`].
//!
//! Bundling rules:
//! - Same-document references are kept as written.
//! - External schemas are hoisted into the root's `components/schemas`, either
//!   under the name they were declared with or, for whole-file schemas, the file stem.
//! - Any other external target is inlined at its first occurrence; later
//!   occurrences point back at that location.
//!
//! No network access is performed. Non-`file` URIs must be registered up front.

use crate::error::{AppError, AppResult};
use crate::oas::document::BundledDocument;
use crate::oas::ref_utils::{
    as_reference, decode_pointer_segment, encode_pointer_segment, join_pointer, resolve_pointer,
};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, trace, warn};
use url::Url;

const DUMMY_BASE: &str = "http://example.invalid/";

/// Fetches the text of documents that were not registered up front.
pub trait DocumentSource {
    /// Returns the raw YAML/JSON text behind `uri`.
    fn fetch(&self, uri: &Url) -> AppResult<String>;
}

/// Reads `file:` URIs from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl DocumentSource for FsSource {
    fn fetch(&self, uri: &Url) -> AppResult<String> {
        if uri.scheme() != "file" {
            return Err(AppError::General(format!(
                "Cannot fetch '{}': only file URIs are read, register other documents first",
                uri
            )));
        }
        let path = uri
            .to_file_path()
            .map_err(|_| AppError::General(format!("Invalid file URI '{}'", uri)))?;
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Registry of raw documents plus the bundling entry points.
#[derive(Debug, Default)]
pub struct DocumentLoader<S = FsSource> {
    source: S,
    docs: HashMap<Url, Value>,
}

impl DocumentLoader<FsSource> {
    /// Creates a loader reading unregistered documents from disk.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: DocumentSource> DocumentLoader<S> {
    /// Creates a loader backed by a custom document source.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            docs: HashMap::new(),
        }
    }

    /// Registers a document from YAML (or JSON) text.
    pub fn register_yaml(&mut self, uri: &str, text: &str) -> AppResult<()> {
        let raw = parse_document_text(uri, text)?;
        self.register_json(uri, raw)
    }

    /// Registers an already parsed document.
    pub fn register_json(&mut self, uri: &str, raw: Value) -> AppResult<()> {
        let url = parse_uri(uri)?;
        debug!(uri = %url, "registered document");
        self.docs.insert(url, raw);
        Ok(())
    }

    /// Loads the document at `path` from disk and bundles it.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> AppResult<BundledDocument> {
        let path = path.as_ref();
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        let url = Url::from_file_path(&absolute).map_err(|_| {
            AppError::General(format!("Cannot build a file URI for '{}'", absolute.display()))
        })?;
        self.bundle(url.as_str())
    }

    /// Bundles the document registered (or fetchable) at `root_uri`.
    pub fn bundle(&mut self, root_uri: &str) -> AppResult<BundledDocument> {
        let root_url = document_url(&parse_uri(root_uri)?);
        let mut root = self.document(&root_url)?.clone();
        check_version(&root)?;

        let mut bundler = Bundler::new(self, root_url.clone(), &root);
        bundler.reserve_component_schemas(&root)?;
        bundler.walk(&mut root, &root_url, String::new(), Position::Other)?;
        let hoisted = std::mem::take(&mut bundler.hoisted);
        let external = bundler.external_count;

        if !hoisted.is_empty() {
            let schemas = component_schemas_mut(&mut root)?;
            for (name, schema) in hoisted {
                schemas.insert(name, schema);
            }
        }

        debug!(
            uri = %root_url,
            external_references = external,
            "bundled document"
        );
        BundledDocument::new(root_url.to_string(), root)
    }

    /// Returns a document by URI, fetching it through the source on first use.
    fn document(&mut self, url: &Url) -> AppResult<&Value> {
        if !self.docs.contains_key(url) {
            trace!(uri = %url, "fetching document");
            let text = self.source.fetch(url)?;
            let raw = parse_document_text(url.as_str(), &text)?;
            self.docs.insert(url.clone(), raw);
        }
        self.docs
            .get(url)
            .ok_or_else(|| AppError::General(format!("Document '{}' vanished", url)))
    }
}

/// Where a value sits relative to schema keywords; decides hoisting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// A Schema Object.
    Schema,
    /// A map whose values are schemas (`properties`, `components/schemas`).
    SchemaMap,
    /// An array whose items are schemas (`allOf`, `oneOf`, `anyOf`).
    SchemaList,
    /// Anything else.
    Other,
}

impl Position {
    fn child(self, pointer: &str, key: &str) -> Position {
        match self {
            Position::SchemaMap | Position::SchemaList => Position::Schema,
            Position::Schema => match key {
                "items" | "not" | "additionalProperties" => Position::Schema,
                "properties" | "patternProperties" | "$defs" | "definitions" => {
                    Position::SchemaMap
                }
                "allOf" | "anyOf" | "oneOf" | "prefixItems" => Position::SchemaList,
                _ => Position::Other,
            },
            Position::Other => match (pointer, key) {
                (_, "schema") => Position::Schema,
                ("/components", "schemas") | ("", "definitions") => Position::SchemaMap,
                _ => Position::Other,
            },
        }
    }
}

struct Bundler<'l, S> {
    loader: &'l mut DocumentLoader<S>,
    root_url: Url,
    /// External schema targets hoisted into `components/schemas`, by name.
    hoisted: IndexMap<String, Value>,
    /// Target key (`uri#fragment`) -> hoisted component name.
    hoisted_names: HashMap<String, String>,
    /// Target key -> pointer of its first inlined occurrence.
    inlined: HashMap<String, String>,
    taken_names: HashSet<String>,
    external_count: usize,
}

impl<'l, S: DocumentSource> Bundler<'l, S> {
    fn new(loader: &'l mut DocumentLoader<S>, root_url: Url, root: &Value) -> Self {
        let taken_names = root
            .pointer("/components/schemas")
            .and_then(Value::as_object)
            .map(|schemas| schemas.keys().cloned().collect())
            .unwrap_or_default();
        Self {
            loader,
            root_url,
            hoisted: IndexMap::new(),
            hoisted_names: HashMap::new(),
            inlined: HashMap::new(),
            taken_names,
            external_count: 0,
        }
    }

    /// Root component schemas that are bare external refs keep their own name.
    fn reserve_component_schemas(&mut self, root: &Value) -> AppResult<()> {
        let Some(schemas) = root.pointer("/components/schemas").and_then(Value::as_object)
        else {
            return Ok(());
        };
        for (name, schema) in schemas {
            let Some(ref_str) = as_reference(schema) else {
                continue;
            };
            let target = resolve_url(&self.root_url, ref_str)?;
            if document_url(&target) != self.root_url {
                self.hoisted_names
                    .entry(target_key(&target))
                    .or_insert_with(|| name.clone());
            }
        }
        Ok(())
    }

    fn walk(
        &mut self,
        value: &mut Value,
        base: &Url,
        pointer: String,
        position: Position,
    ) -> AppResult<()> {
        if let Some(ref_str) = as_reference(value) {
            let ref_str = ref_str.to_string();
            return self.rewrite_reference(value, &ref_str, base, pointer, position);
        }

        match value {
            Value::Object(map) => {
                for (key, child) in map.iter_mut() {
                    let child_pointer = join_pointer(&pointer, key);
                    let child_position = position.child(&pointer, key);
                    self.walk(child, base, child_pointer, child_position)?;
                }
            }
            Value::Array(items) => {
                let item_position = match position {
                    Position::SchemaList => Position::Schema,
                    _ => Position::Other,
                };
                for (idx, item) in items.iter_mut().enumerate() {
                    let child_pointer = format!("{}/{}", pointer, idx);
                    self.walk(item, base, child_pointer, item_position)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn rewrite_reference(
        &mut self,
        value: &mut Value,
        ref_str: &str,
        base: &Url,
        pointer: String,
        position: Position,
    ) -> AppResult<()> {
        let target = resolve_url(base, ref_str)?;
        let target_doc = document_url(&target);
        let fragment = target.fragment().unwrap_or("").to_string();

        if target_doc == self.root_url {
            set_ref(value, format!("#{}", fragment));
            return Ok(());
        }

        let key = target_key(&target);
        if let Some(name) = self.hoisted_names.get(&key).cloned() {
            // A root component that is itself the hoist target is inlined in place.
            if pointer == join_pointer("/components/schemas", &name) && !self.hoisted.contains_key(&name)
            {
                return self.inline_in_place(value, &key, &target_doc, &fragment, ref_str, base, pointer);
            }
            set_ref(value, format!("#{}", join_pointer("/components/schemas", &name)));
            return Ok(());
        }
        if let Some(first) = self.inlined.get(&key) {
            set_ref(value, format!("#{}", first));
            return Ok(());
        }

        self.external_count += 1;
        match hoist_name(&target_doc, &fragment, position) {
            Some(name) => {
                let name = self.unique_name(&name);
                debug!(reference = ref_str, name = %name, "hoisting external schema");
                self.hoisted_names.insert(key.clone(), name.clone());
                let mut schema = self.fetch_target(&target_doc, &fragment, ref_str, base)?;
                let schema_pointer = join_pointer("/components/schemas", &name);
                self.walk(&mut schema, &target_doc, schema_pointer.clone(), Position::Schema)?;
                self.hoisted.insert(name, schema);
                set_ref(value, format!("#{}", schema_pointer));
                Ok(())
            }
            None => {
                debug!(reference = ref_str, at = %pointer, "inlining external reference");
                self.inline_in_place(value, &key, &target_doc, &fragment, ref_str, base, pointer)
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn inline_in_place(
        &mut self,
        value: &mut Value,
        key: &str,
        target_doc: &Url,
        fragment: &str,
        ref_str: &str,
        base: &Url,
        pointer: String,
    ) -> AppResult<()> {
        self.inlined.insert(key.to_string(), pointer.clone());
        let mut inlined = self.fetch_target(target_doc, fragment, ref_str, base)?;
        // Keep the position of the reference site for nested hoisting decisions.
        let position = position_of(&pointer);
        self.walk(&mut inlined, target_doc, pointer, position)?;
        *value = inlined;
        Ok(())
    }

    fn fetch_target(
        &mut self,
        target_doc: &Url,
        fragment: &str,
        ref_str: &str,
        base: &Url,
    ) -> AppResult<Value> {
        let unresolved = || AppError::UnresolvedReference {
            reference: ref_str.to_string(),
            base: base.to_string(),
        };
        let doc = match self.loader.document(target_doc) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(reference = ref_str, error = %e, "failed to load referenced document");
                return Err(unresolved());
            }
        };
        resolve_pointer(doc, fragment).cloned().ok_or_else(unresolved)
    }

    fn unique_name(&mut self, name: &str) -> String {
        let mut candidate = name.to_string();
        let mut suffix = 1;
        while self.taken_names.contains(&candidate) {
            candidate = format!("{}{}", name, suffix);
            suffix += 1;
        }
        if candidate != name {
            debug!(name, renamed = %candidate, "schema name collision");
        }
        self.taken_names.insert(candidate.clone());
        candidate
    }
}

/// Recomputes the position of a pointer inside the root document.
fn position_of(pointer: &str) -> Position {
    let mut position = Position::Other;
    let mut parent = String::new();
    for raw in pointer.split('/').skip(1) {
        let key = decode_pointer_segment(raw);
        position = match position {
            Position::SchemaList => Position::Schema,
            other => other.child(&parent, &key),
        };
        parent = join_pointer(&parent, &key);
    }
    position
}

/// Picks the component name for an external target that should be hoisted.
fn hoist_name(target_doc: &Url, fragment: &str, position: Position) -> Option<String> {
    let segments: Vec<String> = fragment
        .trim_start_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .map(decode_pointer_segment)
        .collect();

    match segments.as_slice() {
        [components, schemas, name] if components == "components" && schemas == "schemas" => {
            Some(name.clone())
        }
        [definitions, name] if definitions == "definitions" => Some(name.clone()),
        [] if position == Position::Schema => target_doc
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .and_then(|file| file.split('.').next())
            .filter(|stem| !stem.is_empty())
            .map(decode_pointer_segment),
        _ => None,
    }
}

fn set_ref(value: &mut Value, ref_str: String) {
    if let Value::Object(map) = value {
        map.insert("$ref".to_string(), Value::String(ref_str));
    }
}

fn target_key(target: &Url) -> String {
    target.to_string()
}

fn document_url(url: &Url) -> Url {
    let mut doc = url.clone();
    doc.set_fragment(None);
    doc
}

fn resolve_url(base: &Url, ref_str: &str) -> AppResult<Url> {
    base.join(ref_str).map_err(|_| AppError::UnresolvedReference {
        reference: ref_str.to_string(),
        base: base.to_string(),
    })
}

/// Parses a document identifier; bare relative names live under a dummy base.
fn parse_uri(uri: &str) -> AppResult<Url> {
    if let Ok(url) = Url::parse(uri) {
        return Ok(url);
    }
    let path = Path::new(uri);
    if path.is_absolute() {
        return Url::from_file_path(path)
            .map_err(|_| AppError::General(format!("Cannot build a file URI for '{}'", uri)));
    }
    let base = Url::parse(DUMMY_BASE)
        .map_err(|e| AppError::General(format!("Invalid dummy base: {}", e)))?;
    base.join(uri)
        .map_err(|e| AppError::General(format!("Invalid document URI '{}': {}", uri, e)))
}

fn check_version(root: &Value) -> AppResult<()> {
    match root.get("openapi").and_then(Value::as_str) {
        Some(version) if version.starts_with("3.") => Ok(()),
        Some(version) => Err(AppError::UnsupportedVersion(format!("openapi {}", version))),
        None => match root.get("swagger").and_then(Value::as_str) {
            Some(version) => Err(AppError::UnsupportedVersion(format!("swagger {}", version))),
            None => Err(AppError::UnsupportedVersion(
                "missing 'openapi' version field".into(),
            )),
        },
    }
}

fn component_schemas_mut(root: &mut Value) -> AppResult<&mut Map<String, Value>> {
    let root_map = root
        .as_object_mut()
        .ok_or_else(|| AppError::Parse("OpenAPI document root must be an object".into()))?;
    let components = root_map
        .entry("components")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| AppError::Parse("'components' must be an object".into()))?;
    components
        .entry("schemas")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| AppError::Parse("'components/schemas' must be an object".into()))
}

/// Parses YAML (a superset of JSON) into a JSON value; scalar keys become strings.
pub(crate) fn parse_document_text(uri: &str, text: &str) -> AppResult<Value> {
    serde_yaml::from_str(text)
        .map_err(|e| AppError::Parse(format!("Failed to parse document '{}': {}", uri, e)))
}

/// Builds the pointer of a root component schema; used by callers and tests.
pub(crate) fn component_schema_pointer(name: &str) -> String {
    format!("#/components/schemas/{}", encode_pointer_segment(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn loader_with(docs: &[(&str, &str)]) -> DocumentLoader {
        let mut loader = DocumentLoader::new();
        for (uri, text) in docs {
            loader.register_yaml(uri, text).unwrap();
        }
        loader
    }

    #[test]
    fn test_local_refs_are_kept() {
        let root = r#"
openapi: 3.0.3
info: {title: T, version: '1'}
paths: {}
components:
  schemas:
    A: { $ref: '#/components/schemas/B' }
    B: { type: string }
"#;
        let doc = loader_with(&[("openapi.yaml", root)])
            .bundle("openapi.yaml")
            .unwrap();
        assert_eq!(
            doc.root()["components"]["schemas"]["A"],
            json!({"$ref": "#/components/schemas/B"})
        );
    }

    #[test]
    fn test_external_component_schema_is_hoisted() {
        let root = r#"
openapi: 3.0.3
info: {title: T, version: '1'}
paths:
  /pets:
    get:
      responses:
        '200':
          description: OK
          content:
            application/json:
              schema: { $ref: 'common.yaml#/components/schemas/Pet' }
"#;
        let common = r#"
components:
  schemas:
    Pet:
      type: object
      properties:
        owner: { $ref: '#/components/schemas/Owner' }
    Owner: { type: string }
"#;
        let doc = loader_with(&[("openapi.yaml", root), ("common.yaml", common)])
            .bundle("openapi.yaml")
            .unwrap();
        let schema = &doc.root()["paths"]["/pets"]["get"]["responses"]["200"]["content"]
            ["application/json"]["schema"];
        assert_eq!(schema, &json!({"$ref": "#/components/schemas/Pet"}));
        assert_eq!(
            doc.root()["components"]["schemas"]["Pet"]["properties"]["owner"],
            json!({"$ref": "#/components/schemas/Owner"})
        );
        assert_eq!(
            doc.root()["components"]["schemas"]["Owner"],
            json!({"type": "string"})
        );
    }

    #[test]
    fn test_component_alias_keeps_declared_name() {
        let root = r#"
openapi: 3.0.3
info: {title: T, version: '1'}
paths: {}
components:
  schemas:
    Animal: { $ref: './pet.yaml' }
"#;
        let pet = "type: object\nproperties:\n  name: { type: string }\n";
        let doc = loader_with(&[("openapi.yaml", root), ("pet.yaml", pet)])
            .bundle("openapi.yaml")
            .unwrap();
        let schemas = doc.root()["components"]["schemas"].as_object().unwrap();
        assert_eq!(schemas.len(), 1);
        assert_eq!(schemas["Animal"]["type"], json!("object"));
    }

    #[test]
    fn test_external_non_schema_is_inlined_once() {
        let root = r#"
openapi: 3.0.3
info: {title: T, version: '1'}
paths:
  /a:
    get:
      parameters: [ { $ref: 'params.yaml#/Limit' } ]
      responses: { '204': { description: none } }
  /b:
    get:
      parameters: [ { $ref: 'params.yaml#/Limit' } ]
      responses: { '204': { description: none } }
"#;
        let params = "Limit: { name: limit, in: query, schema: { type: integer } }\n";
        let doc = loader_with(&[("openapi.yaml", root), ("params.yaml", params)])
            .bundle("openapi.yaml")
            .unwrap();
        assert_eq!(doc.root()["paths"]["/a"]["get"]["parameters"][0]["name"], json!("limit"));
        assert_eq!(
            doc.root()["paths"]["/b"]["get"]["parameters"][0],
            json!({"$ref": "#/paths/~1a/get/parameters/0"})
        );
    }

    #[test]
    fn test_cyclic_external_schemas_terminate() {
        let root = r#"
openapi: 3.0.3
info: {title: T, version: '1'}
paths: {}
components:
  schemas:
    Node: { $ref: 'tree.yaml#/components/schemas/Node' }
"#;
        let tree = r#"
components:
  schemas:
    Node:
      type: object
      properties:
        children:
          type: array
          items: { $ref: '#/components/schemas/Node' }
"#;
        let doc = loader_with(&[("openapi.yaml", root), ("tree.yaml", tree)])
            .bundle("openapi.yaml")
            .unwrap();
        assert_eq!(
            doc.root()["components"]["schemas"]["Node"]["properties"]["children"]["items"],
            json!({"$ref": "#/components/schemas/Node"})
        );
    }

    #[test]
    fn test_hoisted_name_collision_gets_suffix() {
        let root = r#"
openapi: 3.0.3
info: {title: T, version: '1'}
paths:
  /x:
    get:
      responses:
        '200':
          description: OK
          content:
            application/json:
              schema: { $ref: 'other.yaml#/components/schemas/Error' }
components:
  schemas:
    Error: { type: string }
"#;
        let other = "components:\n  schemas:\n    Error: { type: integer }\n";
        let doc = loader_with(&[("openapi.yaml", root), ("other.yaml", other)])
            .bundle("openapi.yaml")
            .unwrap();
        assert_eq!(
            doc.root()["components"]["schemas"]["Error1"],
            json!({"type": "integer"})
        );
    }

    #[test]
    fn test_dangling_reference_is_an_error() {
        let root = r#"
openapi: 3.0.3
info: {title: T, version: '1'}
paths: {}
components:
  schemas:
    A: { $ref: '#/components/schemas/Missing' }
"#;
        let err = loader_with(&[("openapi.yaml", root)])
            .bundle("openapi.yaml")
            .unwrap_err();
        assert!(matches!(err, AppError::UnresolvedReference { .. }));
    }

    #[test]
    fn test_unregistered_remote_document_is_an_error() {
        let root = r#"
openapi: 3.0.3
info: {title: T, version: '1'}
paths: {}
components:
  schemas:
    A:
      type: object
      properties:
        b: { $ref: 'https://schemas.example.com/b.yaml#/components/schemas/B' }
"#;
        let err = loader_with(&[("openapi.yaml", root)])
            .bundle("openapi.yaml")
            .unwrap_err();
        assert!(matches!(err, AppError::UnresolvedReference { .. }));
    }

    struct MemorySource(HashMap<String, String>);

    impl DocumentSource for MemorySource {
        fn fetch(&self, uri: &Url) -> AppResult<String> {
            self.0
                .get(uri.as_str())
                .cloned()
                .ok_or_else(|| AppError::General(format!("No document at '{}'", uri)))
        }
    }

    fn memory_loader(docs: &[(&str, &str)]) -> DocumentLoader<MemorySource> {
        let docs = docs
            .iter()
            .map(|(uri, text)| (uri.to_string(), text.to_string()))
            .collect();
        DocumentLoader::with_source(MemorySource(docs))
    }

    #[test]
    fn test_custom_source_fetches_root_and_references() {
        let root = r#"
openapi: 3.1.0
info: {title: T, version: '1'}
paths: {}
components:
  schemas:
    Order:
      type: object
      properties:
        item: { $ref: 'shared/common.yaml#/components/schemas/Item' }
"#;
        let common = "components:\n  schemas:\n    Item: { type: string }\n";
        let doc = memory_loader(&[
            ("mem://api/openapi.yaml", root),
            ("mem://api/shared/common.yaml", common),
        ])
        .bundle("mem://api/openapi.yaml")
        .unwrap();
        assert_eq!(doc.uri(), "mem://api/openapi.yaml");
        assert_eq!(
            doc.root()["components"]["schemas"]["Order"]["properties"]["item"],
            json!({"$ref": "#/components/schemas/Item"})
        );
        assert_eq!(doc.root()["components"]["schemas"]["Item"], json!({"type": "string"}));
    }

    #[test]
    fn test_custom_source_failure_is_unresolved_reference() {
        let root = r#"
openapi: 3.0.3
info: {title: T, version: '1'}
paths: {}
components:
  schemas:
    Order: { $ref: 'missing.yaml' }
"#;
        let err = memory_loader(&[("mem://api/openapi.yaml", root)])
            .bundle("mem://api/openapi.yaml")
            .unwrap_err();
        match err {
            AppError::UnresolvedReference { reference, base } => {
                assert_eq!(reference, "missing.yaml");
                assert_eq!(base, "mem://api/openapi.yaml");
            }
            other => panic!("expected an unresolved reference, got {}", other),
        }
    }

    #[test]
    fn test_swagger_2_is_rejected() {
        let root = "swagger: '2.0'\ninfo: {title: T, version: '1'}\npaths: {}\n";
        let err = loader_with(&[("openapi.yaml", root)])
            .bundle("openapi.yaml")
            .unwrap_err();
        assert!(matches!(err, AppError::UnsupportedVersion(_)));
    }

    #[test]
    fn test_scalar_keys_are_stringified() {
        let value = parse_document_text(
            "t.yaml",
            "responses:\n  200: { description: OK }\n  true: 1\n",
        )
        .unwrap();
        assert_eq!(value["responses"]["200"]["description"], json!("OK"));
        assert_eq!(value["responses"]["true"], json!(1));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = parse_document_text("t.yaml", "paths: [unclosed\n").unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn test_position_of() {
        assert_eq!(position_of("/components/schemas/Pet"), Position::Schema);
        assert_eq!(
            position_of("/components/schemas/Pet/properties/tags/items"),
            Position::Schema
        );
        assert_eq!(position_of("/paths/~1a/get/parameters/0"), Position::Other);
        assert_eq!(component_schema_pointer("a/b"), "#/components/schemas/a~1b");
    }
}
