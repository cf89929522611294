//! Nested bundle trees and their flattening into dotted-key bundles.

use std::collections::HashMap;

use serde_json::Value;

use crate::types::{
    Generator,
    LanguageBundle,
    LocalizedValue,
};

/// Nested authoring form of a language bundle.
///
/// Internal nodes keep their children in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub enum BundleTree {
    Leaf(LocalizedValue),
    Node(Vec<(String, BundleTree)>),
}

/// Language tag -> nested bundle, as handed to a scope.
pub type BundleTreeSet = HashMap<String, BundleTree>;

impl Default for BundleTree {
    fn default() -> Self {
        Self::Node(Vec::new())
    }
}

impl BundleTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a child entry. A leaf turns into a node holding just that entry.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Self>) -> Self {
        let entry = (key.into(), value.into());
        match &mut self {
            Self::Node(children) => children.push(entry),
            Self::Leaf(_) => self = Self::Node(vec![entry]),
        }
        self
    }

    /// Builds a tree from JSON.
    ///
    /// Objects and arrays become nodes in source order (array children are
    /// keyed by index). Strings become text leaves, numbers and booleans
    /// become text leaves of their JSON rendering and `null` becomes an
    /// empty node.
    #[must_use]
    pub fn from_json(json: &Value) -> Self {
        match json {
            Value::Object(map) => {
                Self::Node(map.iter().map(|(key, value)| (key.clone(), Self::from_json(value))).collect())
            }
            Value::Array(items) => Self::Node(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, value)| (index.to_string(), Self::from_json(value)))
                    .collect(),
            ),
            Value::Null => Self::default(),
            Value::String(s) => Self::Leaf(LocalizedValue::Text(s.clone())),
            other => Self::Leaf(LocalizedValue::Text(other.to_string())),
        }
    }

    /// Wraps an already flat bundle as a one-level tree.
    #[must_use]
    pub fn from_flat(bundle: &LanguageBundle) -> Self {
        Self::Node(bundle.iter().map(|(key, value)| (key.clone(), Self::Leaf(value.clone()))).collect())
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Node(children) => children.iter().map(|(_, child)| child.leaf_count()).sum(),
        }
    }
}

impl From<&str> for BundleTree {
    fn from(text: &str) -> Self {
        Self::Leaf(text.into())
    }
}

impl From<String> for BundleTree {
    fn from(text: String) -> Self {
        Self::Leaf(text.into())
    }
}

impl From<LocalizedValue> for BundleTree {
    fn from(value: LocalizedValue) -> Self {
        Self::Leaf(value)
    }
}

impl From<Generator> for BundleTree {
    fn from(generator: Generator) -> Self {
        Self::Leaf(generator.into())
    }
}

/// Flatten a nested bundle tree into a separator-joined key map.
///
/// # Examples
/// ```
/// use scoped_i18n::input::tree::{BundleTree, flatten};
///
/// let tree = BundleTree::new()
///     .with("common", BundleTree::new().with("hello", "Hello").with("goodbye", "Goodbye"));
///
/// let flattened = flatten(&tree, ".");
/// assert_eq!(flattened.get("common.hello").and_then(|v| v.as_text()), Some("Hello"));
/// assert_eq!(flattened.get("common.goodbye").and_then(|v| v.as_text()), Some("Goodbye"));
/// ```
#[must_use]
pub fn flatten(tree: &BundleTree, separator: &str) -> LanguageBundle {
    let mut result = HashMap::new();
    flatten_node(tree, separator, None, &mut result);
    result
}

/// Flatten JSON directly. See [`BundleTree::from_json`] for how values map.
#[must_use]
pub fn flatten_json(json: &Value, separator: &str) -> LanguageBundle {
    flatten(&BundleTree::from_json(json), separator)
}

fn flatten_node(
    tree: &BundleTree,
    separator: &str,
    prefix: Option<&str>,
    result: &mut LanguageBundle,
) {
    match tree {
        BundleTree::Node(children) => {
            for (key, child) in children {
                let full_key =
                    prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
                flatten_node(child, separator, Some(&full_key), result);
            }
        }
        BundleTree::Leaf(value) => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), value.clone());
            }
        }
    }
}
