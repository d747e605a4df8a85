#![deny(missing_docs)]

//! # OpenAPI Module
//!
//! - **loader**: Reads and bundles documents into one self-contained tree.
//! - **document**: The bundled document and pointer lookups.
//! - **schema**: The schema shape model lowered by the resolver.
//! - **resolver**: Lowering of schemas into type expressions.
//! - **routes**: Parsing logic for API paths/endpoints.
//! - **schemas**: Emission of named component schemas and their variants.
//! - **models**: Intermediate Representation definitions.

pub mod document;
pub mod loader;
pub mod models;
pub(crate) mod ref_utils;
pub mod resolver;
pub mod routes;
pub mod schema;
pub mod schemas;

pub use document::BundledDocument;
pub use loader::{DocumentLoader, DocumentSource, FsSource};
pub use models::{
    HttpMethod, ParamLocation, ParsedEndpoint, ParsedIr, ParsedParameter, ParsedRequestBody,
    ParsedResponse, ParsedSchema, ResponseStatus,
};
pub use resolver::{Lowerer, LoweringContext, TypeExpr};
pub use routes::parse_endpoints;
pub use schema::{SchemaNode, SchemaShape};
pub use schemas::parse_schemas;
