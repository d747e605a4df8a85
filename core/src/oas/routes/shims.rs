#![deny(missing_docs)]

//! # Route Shims
//!
//! Generic structures acting as an Intermediate Deserialization Layer.
//! These structs map directly to the OpenAPI objects the engine consults;
//! schemas stay raw JSON and are parsed into `SchemaNode`s at the lowering site.
//!
//! Note: Shims do not derive `Debug` because `utoipa::RefOr` only implements it
//! behind utoipa's `debug` feature.

use crate::error::{AppError, AppResult};
use crate::oas::document::BundledDocument;
use crate::oas::models::HttpMethod;
use crate::oas::resolver::params::ShimParameter;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use utoipa::openapi::RefOr;

/// A Path Item Object.
#[derive(Deserialize, Default)]
pub struct ShimPathItem {
    /// Parameters shared by every operation of the path.
    #[serde(default)]
    pub parameters: Vec<RefOr<ShimParameter>>,
    /// GET operation.
    pub get: Option<ShimOperation>,
    /// PUT operation.
    pub put: Option<ShimOperation>,
    /// POST operation.
    pub post: Option<ShimOperation>,
    /// DELETE operation.
    pub delete: Option<ShimOperation>,
    /// OPTIONS operation.
    pub options: Option<ShimOperation>,
    /// HEAD operation.
    pub head: Option<ShimOperation>,
    /// PATCH operation.
    pub patch: Option<ShimOperation>,
    /// TRACE operation.
    pub trace: Option<ShimOperation>,
}

impl ShimPathItem {
    /// Parses a path item, following a `$ref` to another path item if present.
    ///
    /// An empty (`null`) path item declares no operations.
    pub fn from_value(doc: &BundledDocument, path: &str, value: &Value) -> AppResult<Self> {
        let value = doc.deref(value).ok_or_else(|| {
            AppError::Parse(format!("Path item '{}' is a reference cycle", path))
        })?;
        if value.is_null() {
            tracing::debug!(path, "Empty path item");
            return Ok(Self::default());
        }
        serde_json::from_value(value.clone())
            .map_err(|e| AppError::Parse(format!("Failed to parse path item '{}': {}", path, e)))
    }

    /// The declared operations, in [`HttpMethod::ALL`] order.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &ShimOperation)> {
        HttpMethod::ALL
            .into_iter()
            .filter_map(move |method| self.operation(method).map(|op| (method, op)))
    }

    /// The operation declared for `method`.
    pub fn operation(&self, method: HttpMethod) -> Option<&ShimOperation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Trace => self.trace.as_ref(),
        }
    }
}

/// An Operation Object.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShimOperation {
    /// Declared unique operation name.
    pub operation_id: Option<String>,
    /// Operation level parameters.
    #[serde(default)]
    pub parameters: Vec<RefOr<ShimParameter>>,
    /// Request body.
    pub request_body: Option<RefOr<ShimRequestBody>>,
    /// Responses keyed by status code, `default` or range.
    #[serde(default)]
    pub responses: IndexMap<String, RefOr<ShimResponse>>,
}

/// A Request Body Object.
#[derive(Debug, Deserialize, Clone)]
pub struct ShimRequestBody {
    /// Content by media type.
    #[serde(default)]
    pub content: IndexMap<String, ShimMediaType>,
    /// Whether the body is required.
    #[serde(default)]
    pub required: bool,
}

/// A Response Object.
#[derive(Debug, Deserialize, Clone)]
pub struct ShimResponse {
    /// Content by media type; absent means "no body".
    pub content: Option<IndexMap<String, ShimMediaType>>,
}

/// A Media Type Object.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct ShimMediaType {
    /// Raw schema value.
    pub schema: Option<Value>,
}

/// Selects the JSON media type from a content map.
///
/// Preference order:
/// 1. `application/json`
/// 2. `application/json` with parameters (e.g. `; charset=utf-8`)
/// 3. Any `+json` media type (e.g. `application/problem+json`)
pub(crate) fn select_json_media(content: &IndexMap<String, ShimMediaType>) -> Option<&ShimMediaType> {
    if let Some(media) = content.get("application/json") {
        return Some(media);
    }

    let essence = |key: &str| key.split(';').next().unwrap_or("").trim().to_ascii_lowercase();

    if let Some((_, media)) = content
        .iter()
        .find(|(k, _)| essence(k) == "application/json")
    {
        return Some(media);
    }

    content
        .iter()
        .find(|(k, _)| essence(k).ends_with("+json"))
        .map(|(_, media)| media)
}

/// Resolves a `RefOr<T>`, following reference chains inside the bundled document.
pub(crate) fn resolve_ref_or<T: DeserializeOwned>(
    doc: &BundledDocument,
    item: &RefOr<T>,
    what: &str,
) -> AppResult<T>
where
    T: Clone,
{
    let mut pointer = match item {
        RefOr::T(value) => return Ok(value.clone()),
        RefOr::Ref(r) => r.ref_location.clone(),
    };

    let mut seen = HashSet::new();
    loop {
        if !seen.insert(pointer.clone()) {
            return Err(AppError::Parse(format!(
                "{} reference cycle at '{}'",
                what, pointer
            )));
        }
        let target = doc
            .resolve(&pointer)
            .ok_or_else(|| AppError::UnresolvedReference {
                reference: pointer.clone(),
                base: doc.uri().to_string(),
            })?;
        let parsed: RefOr<T> = serde_json::from_value(target.clone()).map_err(|e| {
            AppError::Parse(format!("Failed to parse {} at '{}': {}", what, pointer, e))
        })?;
        match parsed {
            RefOr::T(value) => return Ok(value),
            RefOr::Ref(r) => pointer = r.ref_location,
        }
    }
}
