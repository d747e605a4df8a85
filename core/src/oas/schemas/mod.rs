#![deny(missing_docs)]

//! # Schema Parsing
//!
//! Handles emission of OpenAPI `components/schemas` as named type expressions.
//!
//! Each component schema yields its base entry. A schema that transitively
//! contains `readOnly` fields additionally yields `<Name>Writable`, and one that
//! contains `writeOnly` fields yields `<Name>Readable`, in that order. Top-level
//! entries are never namespaced.

use crate::oas::models::ParsedSchema;
use crate::oas::resolver::{Lowerer, LoweringContext, TypeExpr};
use crate::oas::schema::SchemaNode;

/// Emits every component schema, in declaration order, with its variants.
pub fn parse_schemas(lowerer: &Lowerer<'_>) -> Vec<ParsedSchema> {
    let mut schemas = Vec::new();
    for (name, raw) in lowerer.document().schemas() {
        emit_schema(&mut schemas, lowerer, name, &SchemaNode::parse(raw));
    }
    schemas
}

fn emit_schema(out: &mut Vec<ParsedSchema>, lowerer: &Lowerer<'_>, name: &str, node: &SchemaNode) {
    let lower = |ctx: LoweringContext| {
        lowerer.lower(Some(node), ctx).unwrap_or_else(|| {
            tracing::warn!(schema = %name, "Schema has no recognisable shape; using unknown");
            TypeExpr::Unknown
        })
    };

    out.push(ParsedSchema {
        name: name.to_string(),
        type_string: lower(LoweringContext::standalone()).to_string(),
    });

    if lowerer.has_read_only(node) {
        out.push(ParsedSchema {
            name: format!("{}Writable", name),
            type_string: lower(LoweringContext::standalone().writable()).to_string(),
        });
    }

    if lowerer.has_write_only(node) {
        out.push(ParsedSchema {
            name: format!("{}Readable", name),
            type_string: lower(LoweringContext::standalone().readable()).to_string(),
        });
    }
}
