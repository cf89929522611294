//! Core types used throughout the project.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Signature of a generator: call arguments in, display string out.
type GeneratorFn = dyn Fn(&[Value]) -> String + Send + Sync;

/// A localized value computed from call arguments.
///
/// Two generators are equal only when they share the same function instance.
#[derive(Clone)]
pub struct Generator(Arc<GeneratorFn>);

impl Generator {
    #[must_use]
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    #[must_use]
    pub fn call(&self, args: &[Value]) -> String {
        (self.0)(args)
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Generator(..)")
    }
}

impl PartialEq for Generator {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A leaf of a language bundle.
#[derive(Debug, Clone, PartialEq)]
pub enum LocalizedValue {
    Text(String),
    Generator(Generator),
}

impl LocalizedValue {
    #[must_use]
    pub fn generator<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> String + Send + Sync + 'static,
    {
        Self::Generator(Generator::new(f))
    }

    /// Produces the display string. Arguments are ignored for plain text.
    #[must_use]
    pub fn render(&self, args: &[Value]) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Generator(generator) => generator.call(args),
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Generator(_) => None,
        }
    }
}

impl From<&str> for LocalizedValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for LocalizedValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Generator> for LocalizedValue {
    fn from(generator: Generator) -> Self {
        Self::Generator(generator)
    }
}

/// Flat key map for one language (e.g., "common.hello" -> "Hello").
pub type LanguageBundle = HashMap<String, LocalizedValue>;

/// Language tag -> flat bundle.
pub type BundleSet = HashMap<String, LanguageBundle>;

/// Formats a call argument the way it reads inside a sentence.
///
/// Strings are emitted without their JSON quotes; everything else uses its
/// JSON rendering (`1`, `true`, `null`, ...).
#[must_use]
pub fn display_arg(arg: &Value) -> String {
    match arg {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
