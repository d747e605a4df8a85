#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Helper functions for deriving operation names from OpenAPI paths and Operation IDs.

use crate::config::OperationIdCase;
use crate::oas::models::HttpMethod;
use regex::{Captures, Regex};
use std::sync::OnceLock;

fn capitalize(term: &str) -> String {
    let mut chars = term.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Derives an operation name from the HTTP method and path when `operationId` is missing.
///
/// Every `/` or `_` followed by a word character is dropped and the character
/// upper-cased; remaining `/{param}` segments become `Param`.
///
/// e.g. `GET /users/{id}/posts` -> `getUsersIdPosts`
pub fn fallback_operation_name(method: HttpMethod, path: &str) -> String {
    static SEGMENT_START_RE: OnceLock<Regex> = OnceLock::new();
    let segment_start_re = SEGMENT_START_RE
        .get_or_init(|| Regex::new(r"[/_]([A-Za-z0-9_])").expect("Invalid regex"));

    static TEMPLATE_PARAM_RE: OnceLock<Regex> = OnceLock::new();
    let template_param_re =
        TEMPLATE_PARAM_RE.get_or_init(|| Regex::new(r"/\{(.+?)\}").expect("Invalid regex"));

    let segments = segment_start_re.replace_all(path, |caps: &Captures| caps[1].to_uppercase());
    let pascal = template_param_re.replace_all(&segments, |caps: &Captures| capitalize(&caps[1]));

    format!("{}{}", method.as_str(), pascal)
}

/// The operation name of an endpoint: the declared id (optionally re-cased), or the fallback.
pub fn operation_name(
    method: HttpMethod,
    path: &str,
    operation_id: Option<&str>,
    case: Option<OperationIdCase>,
) -> String {
    match operation_id.filter(|id| !id.is_empty()) {
        Some(id) => case.map_or_else(|| id.to_string(), |case| case.apply(id)),
        None => fallback_operation_name(method, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_operation_name() {
        assert_eq!(
            fallback_operation_name(HttpMethod::Get, "/users/{id}/posts"),
            "getUsersIdPosts"
        );
        assert_eq!(fallback_operation_name(HttpMethod::Get, "/users"), "getUsers");
        assert_eq!(
            fallback_operation_name(HttpMethod::Post, "/user_groups/{groupID}"),
            "postUserGroupsGroupid"
        );
        assert_eq!(fallback_operation_name(HttpMethod::Delete, "/"), "delete/");
    }

    #[test]
    fn test_fallback_multi_letter_parameter() {
        assert_eq!(
            fallback_operation_name(HttpMethod::Patch, "/pets/{petId}"),
            "patchPetsPetid"
        );
    }

    #[test]
    fn test_declared_operation_id_wins() {
        assert_eq!(
            operation_name(HttpMethod::Get, "/users", Some("listUsers"), None),
            "listUsers"
        );
        assert_eq!(
            operation_name(HttpMethod::Get, "/users", Some("list_users"), Some(OperationIdCase::Camel)),
            "listUsers"
        );
        assert_eq!(
            operation_name(HttpMethod::Get, "/users", Some("listUsers"), Some(OperationIdCase::Snake)),
            "list_users"
        );
        assert_eq!(operation_name(HttpMethod::Get, "/users", Some(""), None), "getUsers");
    }
}
