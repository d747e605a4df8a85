#![deny(missing_docs)]

//! # Parser Configuration
//!
//! Options recognised by the resolution engine. `ParserOptions` deserializes from
//! camelCase YAML/JSON so a generator can keep it in a config file; the path
//! transform can also be supplied as a closure.

use crate::error::{AppError, AppResult};
use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// A caller supplied path rewrite applied once per endpoint.
pub type PathTransform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Forces `required` on parameters and/or object properties.
///
/// Accepts either a single boolean (applies to both) or a
/// `{ parameters, schemas }` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IgnoreRequiredProp {
    /// One flag for both parameters and schema properties.
    All(bool),
    /// Independent flags.
    Split {
        /// Treat every parameter as required.
        #[serde(default)]
        parameters: bool,
        /// Emit every object property without the optional marker.
        #[serde(default)]
        schemas: bool,
    },
}

impl Default for IgnoreRequiredProp {
    fn default() -> Self {
        IgnoreRequiredProp::All(false)
    }
}

impl IgnoreRequiredProp {
    /// Whether parameters are forced to `required = true`.
    pub fn parameters(self) -> bool {
        match self {
            IgnoreRequiredProp::All(flag) => flag,
            IgnoreRequiredProp::Split { parameters, .. } => parameters,
        }
    }

    /// Whether object properties are forced to be non-optional.
    pub fn schemas(self) -> bool {
        match self {
            IgnoreRequiredProp::All(flag) => flag,
            IgnoreRequiredProp::Split { schemas, .. } => schemas,
        }
    }
}

impl From<bool> for IgnoreRequiredProp {
    fn from(flag: bool) -> Self {
        IgnoreRequiredProp::All(flag)
    }
}

/// Case conversion applied to declared `operationId`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationIdCase {
    /// `listUserPosts`
    Camel,
    /// `ListUserPosts`
    Pascal,
    /// `list_user_posts`
    Snake,
}

impl OperationIdCase {
    /// Converts an operation id to this case.
    pub fn apply(self, operation_id: &str) -> String {
        match self {
            OperationIdCase::Camel => operation_id.to_lower_camel_case(),
            OperationIdCase::Pascal => operation_id.to_upper_camel_case(),
            OperationIdCase::Snake => operation_id.to_snake_case(),
        }
    }
}

/// Declarative path transform: a regex replaced once in every path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PathRewrite {
    /// Regular expression matched against the raw path.
    pub pattern: String,
    /// Replacement text (supports `$1`-style captures).
    #[serde(default)]
    pub replacement: String,
}

/// Options consumed by the resolution engine.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserOptions {
    /// Prefix for referenced type names at namespaced lowering sites.
    pub schema_namespace: String,
    /// Regex based path transform.
    pub path_rewrite: Option<PathRewrite>,
    /// Required-flag overrides.
    pub ignore_required_prop: IgnoreRequiredProp,
    /// Case conversion for declared operation ids.
    pub transform_operation_id: Option<OperationIdCase>,
    #[serde(skip)]
    transform_path: Option<PathTransform>,
}

impl fmt::Debug for ParserOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserOptions")
            .field("schema_namespace", &self.schema_namespace)
            .field("path_rewrite", &self.path_rewrite)
            .field("ignore_required_prop", &self.ignore_required_prop)
            .field("transform_operation_id", &self.transform_operation_id)
            .field("transform_path", &self.transform_path.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl ParserOptions {
    /// Parses options from a YAML (or JSON) string.
    pub fn from_yaml_str(yaml: &str) -> AppResult<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| AppError::Config(format!("Failed to parse parser options: {}", e)))
    }

    /// Sets the schema namespace.
    pub fn with_schema_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.schema_namespace = namespace.into();
        self
    }

    /// Sets a closure used to transform every endpoint path.
    pub fn with_path_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.transform_path = Some(Arc::new(transform));
        self
    }

    /// Sets the required-flag overrides.
    pub fn with_ignore_required_prop(mut self, ignore: impl Into<IgnoreRequiredProp>) -> Self {
        self.ignore_required_prop = ignore.into();
        self
    }

    /// Validates the options and compiles them for the engine.
    pub(crate) fn resolve(&self) -> AppResult<ResolvedOptions> {
        let transform_path: PathTransform = match (&self.transform_path, &self.path_rewrite) {
            (Some(_), Some(_)) => {
                return Err(AppError::Config(
                    "Set either a path transform closure or 'pathRewrite', not both".into(),
                ))
            }
            (Some(transform), None) => Arc::clone(transform),
            (None, Some(rewrite)) => {
                let re = Regex::new(&rewrite.pattern).map_err(|e| {
                    AppError::Config(format!(
                        "Invalid pathRewrite pattern '{}': {}",
                        rewrite.pattern, e
                    ))
                })?;
                let replacement = rewrite.replacement.clone();
                Arc::new(move |path: &str| re.replace(path, replacement.as_str()).into_owned())
            }
            (None, None) => Arc::new(|path: &str| path.to_string()),
        };

        Ok(ResolvedOptions {
            schema_namespace: self.schema_namespace.clone(),
            transform_path,
            required_parameters: self.ignore_required_prop.parameters(),
            required_properties: self.ignore_required_prop.schemas(),
            operation_id_case: self.transform_operation_id,
        })
    }
}

/// Validated options threaded through the engine.
#[derive(Clone)]
pub(crate) struct ResolvedOptions {
    pub(crate) schema_namespace: String,
    pub(crate) transform_path: PathTransform,
    pub(crate) required_parameters: bool,
    pub(crate) required_properties: bool,
    pub(crate) operation_id_case: Option<OperationIdCase>,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self {
            schema_namespace: String::new(),
            transform_path: Arc::new(|path: &str| path.to_string()),
            required_parameters: false,
            required_properties: false,
            operation_id_case: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let resolved = ParserOptions::default().resolve().unwrap();
        assert_eq!(resolved.schema_namespace, "");
        assert_eq!((resolved.transform_path)("/api/users"), "/api/users");
        assert!(!resolved.required_parameters);
        assert!(!resolved.required_properties);
    }

    #[test]
    fn test_ignore_required_bool_form() {
        let opts = ParserOptions::from_yaml_str("ignoreRequiredProp: true").unwrap();
        assert_eq!(opts.ignore_required_prop, IgnoreRequiredProp::All(true));
        assert!(opts.ignore_required_prop.parameters());
        assert!(opts.ignore_required_prop.schemas());
    }

    #[test]
    fn test_ignore_required_split_form() {
        let yaml = r#"
schemaNamespace: schema
ignoreRequiredProp:
  parameters: false
  schemas: true
transformOperationId: camel
"#;
        let opts = ParserOptions::from_yaml_str(yaml).unwrap();
        assert_eq!(opts.schema_namespace, "schema");
        assert!(!opts.ignore_required_prop.parameters());
        assert!(opts.ignore_required_prop.schemas());
        assert_eq!(opts.transform_operation_id, Some(OperationIdCase::Camel));
    }

    #[test]
    fn test_path_rewrite() {
        let yaml = r#"
pathRewrite:
  pattern: "^/api/"
  replacement: "/"
"#;
        let resolved = ParserOptions::from_yaml_str(yaml)
            .unwrap()
            .resolve()
            .unwrap();
        assert_eq!((resolved.transform_path)("/api/users/{id}"), "/users/{id}");
        assert_eq!((resolved.transform_path)("/health"), "/health");
    }

    #[test]
    fn test_invalid_rewrite_is_config_error() {
        let opts = ParserOptions {
            path_rewrite: Some(PathRewrite {
                pattern: "(".into(),
                replacement: String::new(),
            }),
            ..ParserOptions::default()
        };
        assert!(matches!(opts.resolve(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_closure_and_rewrite_conflict() {
        let mut opts = ParserOptions::default().with_path_transform(|p| p.to_uppercase());
        opts.path_rewrite = Some(PathRewrite {
            pattern: "^/v1".into(),
            replacement: String::new(),
        });
        assert!(matches!(opts.resolve(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_operation_id_case() {
        assert_eq!(OperationIdCase::Camel.apply("list_user_posts"), "listUserPosts");
        assert_eq!(OperationIdCase::Pascal.apply("listUserPosts"), "ListUserPosts");
        assert_eq!(OperationIdCase::Snake.apply("listUserPosts"), "list_user_posts");
    }
}
