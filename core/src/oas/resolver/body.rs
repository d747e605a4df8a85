#![deny(missing_docs)]

//! # Body Resolution
//!
//! Logic for extracting the JSON request body type of an operation.
//! Bodies are lowered with the writable mask: `readOnly` properties are
//! dropped and component references route to their `Writable` variants.

use crate::error::AppResult;
use crate::oas::models::ParsedRequestBody;
use crate::oas::resolver::types::{Lowerer, LoweringContext};
use crate::oas::routes::shims::{resolve_ref_or, select_json_media, ShimRequestBody};
use utoipa::openapi::RefOr;

/// Extracts the request body type from the OpenAPI definition.
///
/// A body without a JSON media type (or without a schema) still yields an
/// entry, typed `unknown`.
pub fn extract_request_body(
    lowerer: &Lowerer<'_>,
    body: &RefOr<ShimRequestBody>,
) -> AppResult<ParsedRequestBody> {
    let body = resolve_ref_or(lowerer.document(), body, "request body")?;

    let schema = select_json_media(&body.content).and_then(|media| media.schema.as_ref());
    if schema.is_none() {
        tracing::warn!(
            media_types = ?body.content.keys().collect::<Vec<_>>(),
            "Request body has no JSON schema; using unknown"
        );
    }

    let ty = lowerer.lower_value_or_unknown(schema, LoweringContext::namespaced().writable());
    Ok(ParsedRequestBody {
        type_string: ty.to_string(),
        required: body.required,
    })
}
