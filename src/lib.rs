//! scoped-i18n
//!
//! Scoped localization bundles: nested dictionaries are flattened to dotted
//! keys, merged down a hierarchy of scopes with language inheritance, and
//! resolved values are segmented by a small markdown-style markup engine.

pub mod bundle;
pub mod config;
pub mod error;
pub mod input;
pub mod markup;
pub mod resolve;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use bundle::{
    ScopeConfig,
    ScopeId,
    ScopeTree,
};
pub use error::{
    I18nError,
    MarkupError,
};
