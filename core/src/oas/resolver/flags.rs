#![deny(missing_docs)]

//! # Read/Write Flag Analysis
//!
//! Decides whether a schema (transitively) contains `readOnly` or `writeOnly`
//! properties, which in turn decides whether `Writable` / `Readable` variants exist.
//!
//! Each query carries its own set of visited reference pointers; revisiting a
//! pointer contributes nothing, so self-referential schemas terminate.

use crate::oas::document::BundledDocument;
use crate::oas::schema::{SchemaNode, SchemaShape};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccessFlag {
    ReadOnly,
    WriteOnly,
}

/// True if `node` or anything it reaches declares `readOnly: true`.
pub fn has_read_only(doc: &BundledDocument, node: &SchemaNode) -> bool {
    probe(doc, node, AccessFlag::ReadOnly, &mut HashSet::new())
}

/// True if `node` or anything it reaches declares `writeOnly: true`.
pub fn has_write_only(doc: &BundledDocument, node: &SchemaNode) -> bool {
    probe(doc, node, AccessFlag::WriteOnly, &mut HashSet::new())
}

fn probe(
    doc: &BundledDocument,
    node: &SchemaNode,
    flag: AccessFlag,
    visited: &mut HashSet<String>,
) -> bool {
    let declared = match flag {
        AccessFlag::ReadOnly => node.read_only,
        AccessFlag::WriteOnly => node.write_only,
    };
    if declared {
        return true;
    }

    match &node.shape {
        SchemaShape::Reference(pointer) => {
            if !visited.insert(pointer.clone()) {
                return false;
            }
            doc.resolve(pointer)
                .map(SchemaNode::parse)
                .is_some_and(|target| probe(doc, &target, flag, visited))
        }
        SchemaShape::Composite { members, .. } => members
            .iter()
            .any(|member| probe(doc, member, flag, visited)),
        SchemaShape::Object { properties } => properties
            .values()
            .any(|property| probe(doc, &property.schema, flag, visited)),
        SchemaShape::Array { items: Some(items) } => probe(doc, items, flag, visited),
        SchemaShape::Array { items: None }
        | SchemaShape::Enum { .. }
        | SchemaShape::Primitive(_)
        | SchemaShape::Unknown => false,
    }
}
