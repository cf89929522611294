//! Merging a scope's own bundles over its parent's effective bundles.

use crate::types::BundleSet;

/// Merge `child` over `parent`, per language.
///
/// Child values win on key collision. Languages and keys that only the
/// parent defines stay visible; languages only the child defines pass
/// through unchanged.
#[must_use]
pub fn merge(child: &BundleSet, parent: &BundleSet) -> BundleSet {
    let mut merged = parent.clone();
    for (language, bundle) in child {
        merged
            .entry(language.clone())
            .or_default()
            .extend(bundle.iter().map(|(key, value)| (key.clone(), value.clone())));
    }
    merged
}
