//! Bundle merging, language resolution and the scope hierarchy.

pub mod merge;
pub mod resolver;
pub mod scope;

pub use merge::merge;
pub use resolver::{
    resolve,
    resolve_language,
};
pub use scope::{
    Inherited,
    ScopeConfig,
    ScopeId,
    ScopeNode,
    ScopeTree,
};
