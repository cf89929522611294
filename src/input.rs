//! Bundle inputs: nested trees, flattening and file loading.

pub mod loader;
pub mod tree;

pub use tree::{
    BundleTree,
    BundleTreeSet,
    flatten,
    flatten_json,
};
