#![deny(missing_docs)]

//! # OAS IR
//!
//! Resolves bundled OpenAPI v3 documents into an intermediate representation of
//! named schema type expressions and endpoints, ready for a template renderer.

/// Shared error types.
pub mod error;

/// Parser configuration.
pub mod config;

/// OpenAPI (OAS) loading and resolution.
pub mod oas;

/// Resolution entry point.
pub mod parser;

pub use config::{IgnoreRequiredProp, OperationIdCase, ParserOptions, PathRewrite};
pub use error::{AppError, AppResult};
pub use oas::{
    BundledDocument, DocumentLoader, DocumentSource, FsSource, HttpMethod, ParamLocation,
    ParsedEndpoint, ParsedIr, ParsedParameter, ParsedRequestBody, ParsedResponse, ParsedSchema,
    ResponseStatus,
};
pub use parser::{parse_openapi, Parser};
