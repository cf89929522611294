//! Error types for bundle resolution and markup transformation.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while entering scopes or resolving values.
#[derive(Error, Debug)]
pub enum I18nError {
    /// No language is declared by the scope or any of its ancestors.
    #[error("No lang specified")]
    MissingLanguage,

    /// The active language has no bundle in the merged scope.
    #[error("Unable to find bundle: lang={lang} and bundles={}", .known.join(", "))]
    UnknownLanguage { lang: String, known: Vec<String> },

    #[error("Unknown scope: {0}")]
    UnknownScope(usize),

    /// The i18n property shape could not be turned into requests.
    #[error("Invalid i18n property: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Markup(#[from] MarkupError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A bundle file whose name yields no language tag.
    #[error("Cannot detect language from bundle path: {}", .0.display())]
    InvalidBundlePath(PathBuf),

    #[error("Failed to read bundle file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse bundle JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors produced by markup rules.
#[derive(Error, Debug)]
pub enum MarkupError {
    #[error("Invalid markup pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A classifier pointed its body at a capture group that did not participate.
    #[error("Rule '{rule}' used capture group {group} as body, but it did not match")]
    MissingGroup { rule: String, group: usize },
}
