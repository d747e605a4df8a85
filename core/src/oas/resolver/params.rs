#![deny(missing_docs)]

//! # Parameter Resolution
//!
//! Logic for resolving OpenAPI Parameters into [`ParsedParameter`]s.
//! Path-item level parameters come first, then operation level ones; the two
//! lists are concatenated without de-duplication.

use crate::error::AppResult;
use crate::oas::models::{ParamLocation, ParsedParameter};
use crate::oas::resolver::types::{Lowerer, LoweringContext};
use crate::oas::routes::shims::{resolve_ref_or, select_json_media, ShimMediaType};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use utoipa::openapi::RefOr;

/// A local shim for Parameter holding the fields the engine consults.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ShimParameter {
    /// Name of the parameter.
    pub name: String,
    /// Location of the parameter (query, path, header, cookie).
    #[serde(rename = "in")]
    pub parameter_in: String,
    /// Whether the parameter is required.
    #[serde(default)]
    pub required: bool,
    /// Raw schema definition.
    pub schema: Option<Value>,
    /// Content map, used when `schema` is absent.
    #[serde(default)]
    pub content: IndexMap<String, ShimMediaType>,
}

/// Resolves path-item level and operation level parameters, in that order.
///
/// `required_override` forces every parameter to `required: true`.
pub fn resolve_parameters(
    lowerer: &Lowerer<'_>,
    path_level: &[RefOr<ShimParameter>],
    operation_level: &[RefOr<ShimParameter>],
    required_override: bool,
) -> AppResult<Vec<ParsedParameter>> {
    let mut result = Vec::with_capacity(path_level.len() + operation_level.len());
    for param_or_ref in path_level.iter().chain(operation_level) {
        let param = resolve_ref_or(lowerer.document(), param_or_ref, "parameter")?;
        if let Some(parsed) = process_parameter(lowerer, &param, required_override) {
            result.push(parsed);
        }
    }
    Ok(result)
}

/// Converts one resolved parameter. Returns `None` for unsupported locations.
fn process_parameter(
    lowerer: &Lowerer<'_>,
    param: &ShimParameter,
    required_override: bool,
) -> Option<ParsedParameter> {
    let Some(location) = ParamLocation::from_in(&param.parameter_in) else {
        tracing::warn!(
            parameter = %param.name,
            location = %param.parameter_in,
            "Skipping parameter with unsupported location"
        );
        return None;
    };

    let schema = param
        .schema
        .as_ref()
        .or_else(|| select_json_media(&param.content).and_then(|m| m.schema.as_ref()));
    if schema.is_none() {
        tracing::warn!(parameter = %param.name, "Parameter has no schema; using unknown");
    }

    let ty = lowerer.lower_value_or_unknown(schema, LoweringContext::namespaced());

    Some(ParsedParameter {
        name: param.name.clone(),
        location,
        required: required_override || param.required,
        type_string: ty.to_string(),
    })
}
