//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the crate.
//!
//! Only document loading and configuration can fail. Once a document is bundled,
//! lowering degrades to the `unknown` marker instead of returning errors.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// A document could not be parsed as YAML/JSON or has the wrong shape.
    #[from(ignore)]
    #[display("Parse Error: {_0}")]
    Parse(String),

    /// A `$ref` points at a document or location that cannot be found.
    #[from(ignore)]
    #[display("Unresolved reference '{reference}' (from {base})")]
    UnresolvedReference {
        /// The reference string as written in the document.
        reference: String,
        /// The URI of the document containing the reference.
        base: String,
    },

    /// The root document is not an OpenAPI 3.x document.
    #[from(ignore)]
    #[display("Unsupported document version: {_0}")]
    UnsupportedVersion(String),

    /// Invalid parser configuration.
    #[from(ignore)]
    #[display("Config Error: {_0}")]
    Config(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
