#![deny(missing_docs)]

//! # Schema Model
//!
//! A typed view of OpenAPI Schema Objects. A [`SchemaNode`] is parsed from the
//! bundled JSON tree without following references, so parsing always terminates;
//! references stay as [`SchemaShape::Reference`] pointers and are resolved lazily.
//!
//! Shape priority mirrors lowering: `$ref`, `allOf`, `oneOf`, `anyOf`,
//! `enum`/`const`, `array`, `object`, primitives.

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Primitive JSON Schema types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// `type: string`
    String,
    /// `type: number`
    Number,
    /// `type: integer`
    Integer,
    /// `type: boolean`
    Boolean,
}

impl PrimitiveKind {
    fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(PrimitiveKind::String),
            "number" => Some(PrimitiveKind::Number),
            "integer" => Some(PrimitiveKind::Integer),
            "boolean" => Some(PrimitiveKind::Boolean),
            _ => None,
        }
    }
}

/// Composition keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeKind {
    /// Intersection of all members.
    AllOf,
    /// Exactly one member (lowered as a union).
    OneOf,
    /// Any member (lowered as a union).
    AnyOf,
}

/// A declared object property.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// The property's schema.
    pub schema: SchemaNode,
    /// Whether the property is listed in the owning object's `required`.
    pub required: bool,
}

impl Property {
    /// Whether the property itself is flagged `readOnly`.
    pub fn read_only(&self) -> bool {
        self.schema.read_only
    }

    /// Whether the property itself is flagged `writeOnly`.
    pub fn write_only(&self) -> bool {
        self.schema.write_only
    }
}

/// The mutually exclusive shapes a schema may take.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaShape {
    /// Indirection to another schema by pointer.
    Reference(String),
    /// `allOf` / `oneOf` / `anyOf`.
    Composite {
        /// Composition keyword.
        kind: CompositeKind,
        /// Member schemas.
        members: Vec<SchemaNode>,
    },
    /// Enumerated literal values (`const` is a one-value enum).
    Enum {
        /// Literal values in declaration order.
        values: Vec<Value>,
        /// The declared primitive type, if any.
        base: Option<PrimitiveKind>,
    },
    /// An object; empty `properties` is an open object.
    Object {
        /// Declared properties in declaration order.
        properties: IndexMap<String, Property>,
    },
    /// An array of `items`.
    Array {
        /// Item schema, if declared.
        items: Option<Box<SchemaNode>>,
    },
    /// A primitive type.
    Primitive(PrimitiveKind),
    /// Nothing the engine recognises.
    Unknown,
}

/// A schema node: a shape plus orthogonal flags.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    /// The node's shape.
    pub shape: SchemaShape,
    /// `nullable: true` (or a `"null"` member of a `type` array).
    pub nullable: bool,
    /// `readOnly: true`
    pub read_only: bool,
    /// `writeOnly: true`
    pub write_only: bool,
}

impl SchemaNode {
    /// Parses a Schema Object (or Reference Object) value.
    pub fn parse(value: &Value) -> SchemaNode {
        let Value::Object(map) = value else {
            return SchemaNode::unknown();
        };

        let types = declared_types(map);
        let nullable = is_nullable_value(value) || types.iter().any(|t| *t == "null");
        let mut node = SchemaNode {
            shape: parse_shape(map, &types),
            nullable,
            read_only: flag(map, "readOnly"),
            write_only: flag(map, "writeOnly"),
        };

        // `type: [string, integer]` without other keywords becomes an anyOf.
        if matches!(node.shape, SchemaShape::Unknown) {
            let non_null: Vec<&str> = types.iter().copied().filter(|t| *t != "null").collect();
            if non_null.len() > 1 {
                let members = non_null
                    .iter()
                    .map(|t| {
                        let mut single = map.clone();
                        single.insert("type".to_string(), Value::String((*t).to_string()));
                        single.remove("nullable");
                        SchemaNode::parse(&Value::Object(single))
                    })
                    .collect();
                node.shape = SchemaShape::Composite {
                    kind: CompositeKind::AnyOf,
                    members,
                };
            }
        }
        node
    }

    /// A node with no recognised shape.
    pub fn unknown() -> SchemaNode {
        SchemaNode {
            shape: SchemaShape::Unknown,
            nullable: false,
            read_only: false,
            write_only: false,
        }
    }

    /// The reference pointer, if this node is a reference.
    pub fn reference(&self) -> Option<&str> {
        match &self.shape {
            SchemaShape::Reference(pointer) => Some(pointer),
            _ => None,
        }
    }
}

/// Whether a raw schema value declares itself nullable.
pub(crate) fn is_nullable_value(value: &Value) -> bool {
    let Value::Object(map) = value else {
        return false;
    };
    flag(map, "nullable")
        || flag(map, "x-nullable")
        || declared_types(map).iter().any(|t| *t == "null")
}

fn flag(map: &Map<String, Value>, key: &str) -> bool {
    map.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// `type` as a list: a single string, an array of strings, or nothing.
fn declared_types(map: &Map<String, Value>) -> Vec<&str> {
    match map.get("type") {
        Some(Value::String(t)) => vec![t.as_str()],
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

fn parse_shape(map: &Map<String, Value>, types: &[&str]) -> SchemaShape {
    if let Some(pointer) = map.get("$ref").and_then(Value::as_str) {
        return SchemaShape::Reference(pointer.to_string());
    }

    for (keyword, kind) in [
        ("allOf", CompositeKind::AllOf),
        ("oneOf", CompositeKind::OneOf),
        ("anyOf", CompositeKind::AnyOf),
    ] {
        if let Some(Value::Array(members)) = map.get(keyword) {
            return SchemaShape::Composite {
                kind,
                members: members.iter().map(SchemaNode::parse).collect(),
            };
        }
    }

    let non_null: Vec<&str> = types.iter().copied().filter(|t| *t != "null").collect();
    let single_type = match non_null.as_slice() {
        [only] => Some(*only),
        _ => None,
    };

    if let Some(Value::Array(values)) = map.get("enum") {
        return SchemaShape::Enum {
            values: values.clone(),
            base: single_type.and_then(PrimitiveKind::from_type_name),
        };
    }
    if let Some(value) = map.get("const") {
        return SchemaShape::Enum {
            values: vec![value.clone()],
            base: single_type.and_then(PrimitiveKind::from_type_name),
        };
    }

    match single_type {
        Some("array") => SchemaShape::Array {
            items: map.get("items").map(|items| Box::new(SchemaNode::parse(items))),
        },
        Some("object") => parse_object(map),
        Some(other) => match PrimitiveKind::from_type_name(other) {
            Some(kind) => SchemaShape::Primitive(kind),
            None => SchemaShape::Unknown,
        },
        None if non_null.is_empty() && map.contains_key("properties") => parse_object(map),
        None => SchemaShape::Unknown,
    }
}

fn parse_object(map: &Map<String, Value>) -> SchemaShape {
    let required: Vec<&str> = map
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let properties = map
        .get("properties")
        .and_then(Value::as_object)
        .map(|props| {
            props
                .iter()
                .map(|(name, schema)| {
                    (
                        name.clone(),
                        Property {
                            schema: SchemaNode::parse(schema),
                            required: required.contains(&name.as_str()),
                        },
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    SchemaShape::Object { properties }
}
