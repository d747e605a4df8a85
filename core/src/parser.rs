#![deny(missing_docs)]

//! # Parser
//!
//! The entry point of the resolution engine: takes a bundled document plus
//! options and produces the [`ParsedIr`].
//!
//! The engine performs no I/O; loading and bundling happen beforehand in
//! [`DocumentLoader`].

use crate::config::{ParserOptions, ResolvedOptions};
use crate::error::AppResult;
use crate::oas::document::BundledDocument;
use crate::oas::loader::DocumentLoader;
use crate::oas::models::ParsedIr;
use crate::oas::resolver::Lowerer;
use crate::oas::routes::parse_endpoints;
use crate::oas::schemas::parse_schemas;
use std::path::Path;

/// Resolves one bundled document into the IR.
#[derive(Clone)]
pub struct Parser {
    doc: BundledDocument,
    options: ResolvedOptions,
}

impl Parser {
    /// Creates a parser, validating the options.
    pub fn new(doc: BundledDocument, options: &ParserOptions) -> AppResult<Self> {
        Ok(Self {
            doc,
            options: options.resolve()?,
        })
    }

    /// Loads and bundles the document at `path`, then creates a parser for it.
    pub fn from_file(path: impl AsRef<Path>, options: &ParserOptions) -> AppResult<Self> {
        let doc = DocumentLoader::new().load_file(path)?;
        Self::new(doc, options)
    }

    /// Bundles an in-memory YAML/JSON document, then creates a parser for it.
    pub fn from_yaml_str(yaml: &str, options: &ParserOptions) -> AppResult<Self> {
        Self::new(BundledDocument::from_yaml_str(yaml)?, options)
    }

    /// The bundled document being resolved.
    pub fn document(&self) -> &BundledDocument {
        &self.doc
    }

    /// A lowerer bound to this parser's document and options.
    pub fn lowerer(&self) -> Lowerer<'_> {
        Lowerer::new(&self.doc, &self.options)
    }

    /// Resolves every component schema and every endpoint.
    pub fn parse(&self) -> AppResult<ParsedIr> {
        let lowerer = self.lowerer();

        let schemas = parse_schemas(&lowerer);
        let endpoints = parse_endpoints(&lowerer)?;

        tracing::debug!(
            document = %self.doc.uri(),
            schemas = schemas.len(),
            endpoints = endpoints.len(),
            "Resolved document"
        );

        Ok(ParsedIr { schemas, endpoints })
    }
}

/// Parses a raw OpenAPI YAML string and resolves it into the IR.
pub fn parse_openapi(yaml_content: &str, options: &ParserOptions) -> AppResult<ParsedIr> {
    Parser::from_yaml_str(yaml_content, options)?.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::oas::resolver::LoweringContext;
    use serde_json::json;

    const PETSTORE: &str = r##"
openapi: 3.0.3
info: { title: Pets, version: "1" }
paths:
  /pets:
    get:
      operationId: listPets
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                type: array
                items: { $ref: "#/components/schemas/Pet" }
components:
  schemas:
    Pet:
      type: object
      required: [name]
      properties:
        id: { type: integer, readOnly: true }
        name: { type: string }
"##;

    #[test]
    fn test_parse_petstore() {
        let options = ParserOptions::default().with_schema_namespace("schema");
        let ir = parse_openapi(PETSTORE, &options).unwrap();

        let names: Vec<&str> = ir.schemas.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Pet", "PetWritable"]);

        let list = ir.endpoint("listPets").unwrap();
        assert_eq!(list.responses[0].type_string, "Array<schema.Pet>");
    }

    #[test]
    fn test_lowerer_is_exposed() {
        let parser = Parser::from_yaml_str(PETSTORE, &ParserOptions::default()).unwrap();
        let ty = parser
            .lowerer()
            .lower_value_or_unknown(Some(&json!({ "$ref": "#/components/schemas/Pet" })), LoweringContext::namespaced().writable());
        assert_eq!(ty.to_string(), "PetWritable");
        assert!(parser.document().schema("Pet").is_some());
    }

    #[test]
    fn test_invalid_options_fail_at_construction() {
        let options = ParserOptions::from_yaml_str("pathRewrite: { pattern: '(' }").unwrap();
        let err = Parser::from_yaml_str(PETSTORE, &options).err();
        assert!(matches!(err, Some(AppError::Config(_))));
    }
}
