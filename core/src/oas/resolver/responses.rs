#![deny(missing_docs)]

//! # Response Resolution
//!
//! Logic for resolving OpenAPI Responses into [`ParsedResponse`]s.
//!
//! Every declared status produces one entry, in declaration order. Responses
//! are lowered with the readable mask.

use crate::error::AppResult;
use crate::oas::models::{ParsedResponse, ResponseStatus};
use crate::oas::resolver::expr::TypeExpr;
use crate::oas::resolver::types::{Lowerer, LoweringContext};
use crate::oas::routes::shims::{resolve_ref_or, select_json_media, ShimResponse};
use indexmap::IndexMap;
use utoipa::openapi::RefOr;

/// Resolves every response of an operation.
pub fn extract_responses(
    lowerer: &Lowerer<'_>,
    responses: &IndexMap<String, RefOr<ShimResponse>>,
) -> AppResult<Vec<ParsedResponse>> {
    responses
        .iter()
        .map(|(status, response)| {
            let response = resolve_ref_or(lowerer.document(), response, "response")?;
            let ty = response_type(lowerer, &response);
            if ty == TypeExpr::Unknown {
                tracing::warn!(%status, "Response has no usable JSON schema; using unknown");
            }
            Ok(ParsedResponse {
                status: ResponseStatus::from_key(status),
                type_string: ty.to_string(),
            })
        })
        .collect()
}

/// `null` without content, the readable JSON type otherwise, `unknown` for non-JSON content.
fn response_type(lowerer: &Lowerer<'_>, response: &ShimResponse) -> TypeExpr {
    let Some(content) = &response.content else {
        return TypeExpr::Null;
    };
    let schema = select_json_media(content).and_then(|media| media.schema.as_ref());
    lowerer.lower_value_or_unknown(schema, LoweringContext::namespaced().readable())
}
