#![deny(missing_docs)]

//! # Resolver Module
//!
//! Logic for resolving OpenAPI Schema definitions into type expressions.
//!
//! Handles:
//! - Schema lowering with namespace, readable and writable contexts.
//! - Transitive `readOnly` / `writeOnly` detection.
//! - Parameter resolution (Inline and Reference) via `ShimParameter`.
//! - Request body and response extraction from JSON media types.

pub mod body;
pub mod expr;
pub mod flags;
pub mod params;
pub mod responses;
pub mod types;

pub use body::extract_request_body;
pub use expr::{RecordField, TypeExpr};
pub use flags::{has_read_only, has_write_only};
pub use params::{resolve_parameters, ShimParameter};
pub use responses::extract_responses;
pub use types::{Lowerer, LoweringContext};
