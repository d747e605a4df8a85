#![deny(missing_docs)]

//! # OpenAPI Models
//!
//! The intermediate representation handed to the template renderer.
//!
//! Everything serializes with camelCase keys so templates can address fields the
//! way the document does (`operationName`, `typeString`, ...).

use crate::error::{AppError, AppResult};
use serde::Serialize;
use std::fmt;

/// The resolved IR: named schema types plus endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedIr {
    /// One entry per component schema, plus its `Writable`/`Readable` variants.
    pub schemas: Vec<ParsedSchema>,
    /// One entry per `(path, method)` operation.
    pub endpoints: Vec<ParsedEndpoint>,
}

impl ParsedIr {
    /// Serializes the IR as pretty-printed JSON for a renderer.
    pub fn to_json_pretty(&self) -> AppResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AppError::General(format!("Failed to serialize IR: {}", e)))
    }

    /// Finds a schema entry by name.
    pub fn schema(&self, name: &str) -> Option<&ParsedSchema> {
        self.schemas.iter().find(|s| s.name == name)
    }

    /// Finds an endpoint by operation name.
    pub fn endpoint(&self, operation_name: &str) -> Option<&ParsedEndpoint> {
        self.endpoints
            .iter()
            .find(|e| e.operation_name == operation_name)
    }
}

/// A named type expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedSchema {
    /// Type name (`User`, `UserWritable`, `UserReadable`).
    pub name: String,
    /// Rendered type expression.
    pub type_string: String,
}

/// The eight HTTP methods an OpenAPI path item may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    /// GET
    Get,
    /// PUT
    Put,
    /// POST
    Post,
    /// DELETE
    Delete,
    /// OPTIONS
    Options,
    /// HEAD
    Head,
    /// PATCH
    Patch,
    /// TRACE
    Trace,
}

impl HttpMethod {
    /// All methods, in the order endpoints are emitted per path.
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
        HttpMethod::Trace,
    ];

    /// Lowercase name, as used for path item keys.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    /// URL path template variable.
    Path,
    /// Query string.
    Query,
    /// Request header.
    Header,
    /// Cookie.
    Cookie,
}

impl ParamLocation {
    /// Parses the `in` field of a Parameter Object.
    pub fn from_in(value: &str) -> Option<Self> {
        match value {
            "path" => Some(ParamLocation::Path),
            "query" => Some(ParamLocation::Query),
            "header" => Some(ParamLocation::Header),
            "cookie" => Some(ParamLocation::Cookie),
            _ => None,
        }
    }
}

/// A resolved parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedParameter {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParamLocation,
    /// Whether the parameter is required (possibly forced by configuration).
    pub required: bool,
    /// Rendered type expression.
    pub type_string: String,
}

/// A resolved request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedRequestBody {
    /// Rendered type expression of the JSON body (writable variant).
    pub type_string: String,
    /// Whether the document marks the body as required.
    pub required: bool,
}

/// A response key: a concrete status code, or `default` / a range like `2XX`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseStatus {
    /// A numeric status code.
    Code(u16),
    /// `default` or a range key, kept verbatim.
    Other(String),
}

impl ResponseStatus {
    /// Parses a Responses Object key.
    pub fn from_key(key: &str) -> Self {
        key.parse::<u16>()
            .map(ResponseStatus::Code)
            .unwrap_or_else(|_| ResponseStatus::Other(key.to_string()))
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseStatus::Code(code) => write!(f, "{}", code),
            ResponseStatus::Other(key) => f.write_str(key),
        }
    }
}

/// A resolved response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResponse {
    /// Response status key.
    pub status: ResponseStatus,
    /// Rendered type expression (readable variant); `null` without content.
    pub type_string: String,
}

/// A resolved endpoint, one per `(path, method)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedEndpoint {
    /// The (transformed) path template.
    pub path: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Declared operation id, or the derived fallback.
    pub operation_name: String,
    /// All parameters: path-item level first, then operation level.
    pub parameters: Vec<ParsedParameter>,
    /// Parameters with `in: path`.
    pub path_parameters: Vec<ParsedParameter>,
    /// Parameters with `in: query`.
    pub query_parameters: Vec<ParsedParameter>,
    /// The JSON request body, if declared.
    pub request_body: Option<ParsedRequestBody>,
    /// Responses in declaration order.
    pub responses: Vec<ParsedResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_status_parsing() {
        assert_eq!(ResponseStatus::from_key("204"), ResponseStatus::Code(204));
        assert_eq!(
            ResponseStatus::from_key("default"),
            ResponseStatus::Other("default".into())
        );
        assert_eq!(ResponseStatus::from_key("2XX").to_string(), "2XX");
    }

    #[test]
    fn test_serialized_shape() {
        let response = ParsedResponse {
            status: ResponseStatus::Code(204),
            type_string: "null".into(),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "status": 204, "typeString": "null" })
        );

        let param = ParsedParameter {
            name: "id".into(),
            location: ParamLocation::Path,
            required: true,
            type_string: "string".into(),
        };
        assert_eq!(
            serde_json::to_value(&param).unwrap(),
            json!({ "name": "id", "in": "path", "required": true, "typeString": "string" })
        );
        assert_eq!(serde_json::to_value(HttpMethod::Delete).unwrap(), json!("delete"));
    }

    #[test]
    fn test_param_location() {
        assert_eq!(ParamLocation::from_in("cookie"), Some(ParamLocation::Cookie));
        assert_eq!(ParamLocation::from_in("querystring"), None);
    }
}
