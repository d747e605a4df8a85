#![deny(missing_docs)]

//! # Routes Module
//!
//! Entry point for resolving OpenAPI `paths`.
//! Orchestrates the Parsing of Shims -> Builder -> IR Models.

pub mod builder;
pub mod naming;
pub mod shims;

use crate::error::AppResult;
use crate::oas::models::ParsedEndpoint;
use crate::oas::resolver::Lowerer;
use crate::oas::routes::builder::parse_path_item;
use crate::oas::routes::shims::ShimPathItem;

/// Resolves every operation under `paths`, in document order.
///
/// Specification extensions (`x-*` keys) of the Paths Object are skipped.
pub fn parse_endpoints(lowerer: &Lowerer<'_>) -> AppResult<Vec<ParsedEndpoint>> {
    let doc = lowerer.document();
    let mut endpoints = Vec::new();

    let Some(paths) = doc.paths() else {
        tracing::debug!("Document declares no paths");
        return Ok(endpoints);
    };

    for (path, raw_item) in paths {
        if path.starts_with("x-") {
            continue;
        }
        let path_item = ShimPathItem::from_value(doc, path, raw_item)?;
        parse_path_item(&mut endpoints, lowerer, path, &path_item)?;
    }

    Ok(endpoints)
}
