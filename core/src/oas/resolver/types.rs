#![deny(missing_docs)]

//! # Type Lowering
//!
//! Lowers [`SchemaNode`]s into [`TypeExpr`]s.
//!
//! Dispatch order (first match wins): reference, `allOf`, `oneOf`/`anyOf`, enum,
//! array, object, primitive. Unrecognised shapes lower to `None` and callers
//! substitute the `unknown` marker. Nullability is applied after dispatch.
//!
//! Lowering never follows a reference into its target's shape, only into its
//! flags, so it terminates on cyclic schema graphs.

use crate::config::ResolvedOptions;
use crate::oas::document::BundledDocument;
use crate::oas::ref_utils::{decode_pointer_segment, ref_type_name, split_reference};
use crate::oas::resolver::expr::{RecordField, TypeExpr};
use crate::oas::resolver::flags::{has_read_only, has_write_only};
use crate::oas::schema::{is_nullable_value, CompositeKind, PrimitiveKind, SchemaNode, SchemaShape};
use serde_json::Value;

/// Per-call lowering flags, passed by value through recursion.
///
/// `readable` and `writable` are never both set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoweringContext {
    /// Prefix referenced type names with the configured namespace.
    pub namespaced: bool,
    /// Drop `writeOnly` properties and route references to `…Readable` variants.
    pub readable: bool,
    /// Drop `readOnly` properties and route references to `…Writable` variants.
    pub writable: bool,
}

impl LoweringContext {
    /// Context for endpoint parameters: namespaced, no masking.
    pub const fn namespaced() -> Self {
        Self {
            namespaced: true,
            readable: false,
            writable: false,
        }
    }

    /// Context for top-level schema emission: not namespaced, no masking.
    pub const fn standalone() -> Self {
        Self {
            namespaced: false,
            readable: false,
            writable: false,
        }
    }

    /// The same context with the readable mask.
    pub const fn readable(self) -> Self {
        Self {
            readable: true,
            writable: false,
            ..self
        }
    }

    /// The same context with the writable mask.
    pub const fn writable(self) -> Self {
        Self {
            readable: false,
            writable: true,
            ..self
        }
    }
}

/// Lowers schemas against one bundled document and one set of options.
#[derive(Clone, Copy)]
pub struct Lowerer<'a> {
    doc: &'a BundledDocument,
    options: &'a ResolvedOptions,
}

impl<'a> Lowerer<'a> {
    pub(crate) fn new(doc: &'a BundledDocument, options: &'a ResolvedOptions) -> Self {
        Self { doc, options }
    }

    /// The document this lowerer reads from.
    pub fn document(&self) -> &'a BundledDocument {
        self.doc
    }

    pub(crate) fn options(&self) -> &'a ResolvedOptions {
        self.options
    }

    /// Lowers an optional schema. Returns `None` only for a missing or unrecognised schema.
    pub fn lower(&self, schema: Option<&SchemaNode>, ctx: LoweringContext) -> Option<TypeExpr> {
        self.lower_node(schema?, ctx)
    }

    /// Lowers a raw schema value, substituting `unknown` when nothing can be produced.
    pub fn lower_value_or_unknown(&self, schema: Option<&Value>, ctx: LoweringContext) -> TypeExpr {
        let node = schema.map(SchemaNode::parse);
        self.lower(node.as_ref(), ctx).unwrap_or(TypeExpr::Unknown)
    }

    /// True if the schema transitively contains a `readOnly` field.
    pub fn has_read_only(&self, node: &SchemaNode) -> bool {
        has_read_only(self.doc, node)
    }

    /// True if the schema transitively contains a `writeOnly` field.
    pub fn has_write_only(&self, node: &SchemaNode) -> bool {
        has_write_only(self.doc, node)
    }

    fn lower_node(&self, node: &SchemaNode, ctx: LoweringContext) -> Option<TypeExpr> {
        let lowered = self.lower_shape(node, ctx)?;
        if self.is_nullable(node) {
            Some(lowered.nullable())
        } else {
            Some(lowered)
        }
    }

    /// For references the target decides; a `nullable` sibling also counts.
    fn is_nullable(&self, node: &SchemaNode) -> bool {
        node.nullable
            || node
                .reference()
                .and_then(|pointer| self.doc.resolve(pointer))
                .is_some_and(is_nullable_value)
    }

    fn lower_shape(&self, node: &SchemaNode, ctx: LoweringContext) -> Option<TypeExpr> {
        match &node.shape {
            SchemaShape::Reference(pointer) => Some(self.lower_reference(pointer, ctx)),
            SchemaShape::Composite { kind, members } => {
                let lowered: Vec<TypeExpr> = members
                    .iter()
                    .filter_map(|member| self.lower_node(member, ctx))
                    .collect();
                if lowered.is_empty() {
                    return None;
                }
                Some(match kind {
                    CompositeKind::AllOf => TypeExpr::intersection(lowered),
                    CompositeKind::OneOf | CompositeKind::AnyOf => TypeExpr::union(lowered),
                })
            }
            SchemaShape::Enum { values, base } => {
                if values.is_empty() {
                    return None;
                }
                let literals = values
                    .iter()
                    .map(|value| enum_literal(value, *base))
                    .collect();
                Some(TypeExpr::union(literals))
            }
            SchemaShape::Array { items } => {
                let item = self
                    .lower(items.as_deref(), ctx)
                    .unwrap_or(TypeExpr::Unknown);
                Some(TypeExpr::array(item))
            }
            SchemaShape::Object { properties } if properties.is_empty() => {
                Some(TypeExpr::OpenObject)
            }
            SchemaShape::Object { properties } => {
                let fields = properties
                    .iter()
                    .filter(|(_, property)| !(ctx.readable && property.write_only()))
                    .filter(|(_, property)| !(ctx.writable && property.read_only()))
                    .map(|(name, property)| RecordField {
                        name: name.clone(),
                        optional: !(property.required || self.options.required_properties),
                        ty: self
                            .lower_node(&property.schema, ctx)
                            .unwrap_or(TypeExpr::Unknown),
                    })
                    .collect();
                Some(TypeExpr::Record(fields))
            }
            SchemaShape::Primitive(kind) => Some(TypeExpr::Primitive(*kind)),
            SchemaShape::Unknown => None,
        }
    }

    fn lower_reference(&self, pointer: &str, ctx: LoweringContext) -> TypeExpr {
        let mut name = ref_type_name(pointer);

        // Variants only exist for named component schemas, and only the target's
        // own flags decide which ones were emitted.
        if is_component_schema(pointer) {
            if let Some(target) = self.doc.resolve(pointer).map(SchemaNode::parse) {
                if ctx.writable && self.has_read_only(&target) {
                    name.push_str("Writable");
                } else if ctx.readable && self.has_write_only(&target) {
                    name.push_str("Readable");
                }
            }
        }

        if ctx.namespaced && !self.options.schema_namespace.is_empty() {
            name = format!("{}.{}", self.options.schema_namespace, name);
        }
        TypeExpr::Named(name)
    }
}

fn is_component_schema(pointer: &str) -> bool {
    let Some(fragment) = split_reference(pointer).fragment else {
        return false;
    };
    let segments: Vec<String> = fragment
        .trim_start_matches('/')
        .split('/')
        .map(decode_pointer_segment)
        .collect();
    matches!(segments.as_slice(), [c, s, _] if c == "components" && s == "schemas")
}

/// Members of a `type: string` enum are quoted; every other enum renders bare.
fn enum_literal(value: &Value, base: Option<PrimitiveKind>) -> TypeExpr {
    match (value, base) {
        (Value::Null, _) => TypeExpr::Null,
        (Value::String(text), Some(PrimitiveKind::String)) => TypeExpr::StringLiteral(text.clone()),
        (other, Some(PrimitiveKind::String)) => TypeExpr::StringLiteral(other.to_string()),
        (Value::String(text), _) => TypeExpr::Literal(text.clone()),
        (other, _) => TypeExpr::Literal(other.to_string()),
    }
}
