//! Bundle file loading.
//!
//! Each JSON file holds one language; the language tag is the file stem
//! (`locales/en.json` -> `en`, `locales/pt-BR.json` -> `pt-BR`).

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use super::tree::{
    BundleTree,
    BundleTreeSet,
};
use crate::error::I18nError;

/// Detect the language tag from a bundle file path.
fn detect_language_from_path(file_path: &Path) -> Option<String> {
    let stem = file_path.file_stem()?.to_string_lossy();
    if stem.is_empty() { None } else { Some(stem.into_owned()) }
}

/// Load one bundle file as `(language, tree)`.
///
/// # Errors
/// Returns error if the file cannot be read, is not valid JSON, or has no
/// usable file stem.
pub fn load_bundle_file(file_path: &Path) -> Result<(String, BundleTree), I18nError> {
    let language = detect_language_from_path(file_path)
        .ok_or_else(|| I18nError::InvalidBundlePath(file_path.to_path_buf()))?;

    tracing::debug!("Loading bundle file: {:?} (lang={})", file_path, language);

    let content = std::fs::read_to_string(file_path)?;
    let json: Value = serde_json::from_str(&content)?;

    Ok((language, BundleTree::from_json(&json)))
}

/// Load every `*.json` file in `dir` into a bundle set.
///
/// Sub-directories and other files are ignored.
///
/// # Errors
/// Returns the first read or parse error.
pub fn load_bundle_dir(dir: &Path) -> Result<BundleTreeSet, I18nError> {
    let mut bundles = HashMap::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }
        let (language, tree) = load_bundle_file(&path)?;
        bundles.insert(language, tree);
    }

    tracing::debug!("Loaded {} bundle(s) from {:?}", bundles.len(), dir);
    Ok(bundles)
}
