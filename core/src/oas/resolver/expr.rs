#![deny(missing_docs)]

//! # Type Expressions
//!
//! The lowering target: a small composable type language (union, intersection,
//! `Array<T>`, record literals, literal types). Built as a tree and rendered via
//! `Display`, which handles flattening and precedence.

use crate::oas::schema::PrimitiveKind;
use std::fmt;

/// Rendered when a schema is missing or cannot be lowered.
pub const UNKNOWN_MARKER: &str = "unknown";
/// Rendered for objects without declared properties.
pub const OPEN_OBJECT_MARKER: &str = "object";
/// The null literal type; also the type of a response without content.
pub const NULL_MARKER: &str = "null";

/// A field of a record literal.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    /// Property name.
    pub name: String,
    /// Renders a `?` after the name.
    pub optional: bool,
    /// Property type.
    pub ty: TypeExpr,
}

/// A type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// A named (possibly namespaced) type.
    Named(String),
    /// A primitive type.
    Primitive(PrimitiveKind),
    /// A quoted string literal type.
    StringLiteral(String),
    /// A bare literal type (numbers, booleans, `null` enum members).
    Literal(String),
    /// The null type.
    Null,
    /// The fallback marker.
    Unknown,
    /// Object without declared properties.
    OpenObject,
    /// `Array<T>`
    Array(Box<TypeExpr>),
    /// `{ a: T; b?: U }`
    Record(Vec<RecordField>),
    /// `A | B`
    Union(Vec<TypeExpr>),
    /// `A & B`
    Intersection(Vec<TypeExpr>),
}

impl TypeExpr {
    /// Builds a union, flattening nested unions. A single member is returned as is.
    pub fn union(members: Vec<TypeExpr>) -> TypeExpr {
        let mut flat = Vec::with_capacity(members.len());
        for member in members {
            match member {
                TypeExpr::Union(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        if flat.len() == 1 {
            flat.remove(0)
        } else {
            TypeExpr::Union(flat)
        }
    }

    /// Builds an intersection, flattening nested intersections.
    pub fn intersection(members: Vec<TypeExpr>) -> TypeExpr {
        let mut flat = Vec::with_capacity(members.len());
        for member in members {
            match member {
                TypeExpr::Intersection(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        if flat.len() == 1 {
            flat.remove(0)
        } else {
            TypeExpr::Intersection(flat)
        }
    }

    /// `self | null`
    pub fn nullable(self) -> TypeExpr {
        TypeExpr::union(vec![self, TypeExpr::Null])
    }

    /// `Array<item>`
    pub fn array(item: TypeExpr) -> TypeExpr {
        TypeExpr::Array(Box::new(item))
    }
}

/// Name of the output type for a primitive.
pub fn primitive_name(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::String => "string",
        PrimitiveKind::Number | PrimitiveKind::Integer => "number",
        PrimitiveKind::Boolean => "boolean",
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_str("'")?;
    for c in text.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\'' => f.write_str("\\'")?,
            '\n' => f.write_str("\\n")?,
            other => write!(f, "{}", other)?,
        }
    }
    f.write_str("'")
}

fn write_joined(f: &mut fmt::Formatter<'_>, members: &[TypeExpr], sep: &str) -> fmt::Result {
    for (idx, member) in members.iter().enumerate() {
        if idx > 0 {
            f.write_str(sep)?;
        }
        match (sep, member) {
            (" & ", TypeExpr::Union(_)) => write!(f, "({})", member)?,
            _ => write!(f, "{}", member)?,
        }
    }
    Ok(())
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named(name) => f.write_str(name),
            TypeExpr::Primitive(kind) => f.write_str(primitive_name(*kind)),
            TypeExpr::StringLiteral(text) => write_quoted(f, text),
            TypeExpr::Literal(text) => f.write_str(text),
            TypeExpr::Null => f.write_str(NULL_MARKER),
            TypeExpr::Unknown => f.write_str(UNKNOWN_MARKER),
            TypeExpr::OpenObject => f.write_str(OPEN_OBJECT_MARKER),
            TypeExpr::Array(item) => write!(f, "Array<{}>", item),
            TypeExpr::Record(fields) if fields.is_empty() => f.write_str("{}"),
            TypeExpr::Record(fields) => {
                f.write_str("{ ")?;
                for (idx, field) in fields.iter().enumerate() {
                    if idx > 0 {
                        f.write_str("; ")?;
                    }
                    if is_identifier(&field.name) {
                        f.write_str(&field.name)?;
                    } else {
                        write_quoted(f, &field.name)?;
                    }
                    if field.optional {
                        f.write_str("?")?;
                    }
                    write!(f, ": {}", field.ty)?;
                }
                f.write_str(" }")
            }
            TypeExpr::Union(members) => write_joined(f, members, " | "),
            TypeExpr::Intersection(members) => write_joined(f, members, " & "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(n: &str) -> TypeExpr {
        TypeExpr::Named(n.to_string())
    }

    #[test]
    fn test_record_rendering() {
        let record = TypeExpr::Record(vec![
            RecordField {
                name: "id".into(),
                optional: false,
                ty: TypeExpr::Primitive(PrimitiveKind::Integer),
            },
            RecordField {
                name: "x-trace".into(),
                optional: true,
                ty: TypeExpr::Primitive(PrimitiveKind::String),
            },
        ]);
        assert_eq!(record.to_string(), "{ id: number; 'x-trace'?: string }");
    }

    #[test]
    fn test_nullable_flattens_union() {
        let ty = TypeExpr::union(vec![
            TypeExpr::StringLiteral("a".into()),
            TypeExpr::StringLiteral("b".into()),
        ])
        .nullable();
        assert_eq!(ty.to_string(), "'a' | 'b' | null");
    }

    #[test]
    fn test_union_inside_intersection_is_parenthesised() {
        let ty = TypeExpr::intersection(vec![named("A").nullable(), named("B")]);
        assert_eq!(ty.to_string(), "(A | null) & B");
    }

    #[test]
    fn test_single_member_collapses() {
        assert_eq!(TypeExpr::intersection(vec![named("X")]), named("X"));
        assert_eq!(TypeExpr::union(vec![named("X")]), named("X"));
    }

    #[test]
    fn test_string_literal_escaping() {
        let ty = TypeExpr::StringLiteral("it's".into());
        assert_eq!(ty.to_string(), "'it\\'s'");
    }

    #[test]
    fn test_array() {
        let ty = TypeExpr::array(named("Pet"));
        assert_eq!(ty.to_string(), "Array<Pet>");
    }
}
