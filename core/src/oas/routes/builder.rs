#![deny(missing_docs)]

//! # Route Builder
//!
//! Logic that transforms `Shim` structs into [`ParsedEndpoint`] IR models.

use crate::error::AppResult;
use crate::oas::models::{HttpMethod, ParamLocation, ParsedEndpoint};
use crate::oas::resolver::{extract_request_body, extract_responses, resolve_parameters, Lowerer};
use crate::oas::routes::naming::operation_name;
use crate::oas::routes::shims::{ShimOperation, ShimPathItem};

/// Helper to iterate methods in a ShimPathItem and extract all operations as endpoints.
pub fn parse_path_item(
    endpoints: &mut Vec<ParsedEndpoint>,
    lowerer: &Lowerer<'_>,
    path: &str,
    path_item: &ShimPathItem,
) -> AppResult<()> {
    for (method, operation) in path_item.operations() {
        endpoints.push(build_endpoint(lowerer, path, method, operation, path_item)?);
    }
    Ok(())
}

/// Builds one endpoint. The path transform runs before the fallback name is derived.
pub fn build_endpoint(
    lowerer: &Lowerer<'_>,
    raw_path: &str,
    method: HttpMethod,
    operation: &ShimOperation,
    path_item: &ShimPathItem,
) -> AppResult<ParsedEndpoint> {
    let options = lowerer.options();
    let path = (options.transform_path)(raw_path);

    let operation_name = operation_name(
        method,
        &path,
        operation.operation_id.as_deref(),
        options.operation_id_case,
    );

    let parameters = resolve_parameters(
        lowerer,
        &path_item.parameters,
        &operation.parameters,
        options.required_parameters,
    )?;

    let request_body = operation
        .request_body
        .as_ref()
        .map(|body| extract_request_body(lowerer, body))
        .transpose()?;

    let responses = extract_responses(lowerer, &operation.responses)?;

    let by_location = |location: ParamLocation| {
        parameters
            .iter()
            .filter(|p| p.location == location)
            .cloned()
            .collect::<Vec<_>>()
    };
    let path_parameters = by_location(ParamLocation::Path);
    let query_parameters = by_location(ParamLocation::Query);

    tracing::trace!(%method, %path, %operation_name, "Built endpoint");

    Ok(ParsedEndpoint {
        path,
        method,
        operation_name,
        parameters,
        path_parameters,
        query_parameters,
        request_body,
        responses,
    })
}
