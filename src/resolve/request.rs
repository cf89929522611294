//! Keyed requests and the i18n property shapes they are parsed from.

use serde::Deserialize;
use serde_json::{
    Map,
    Value,
};

use crate::error::I18nError;

/// Key holding positional arguments in the object form.
const ARGS_KEY: &str = "args";

/// One property to fill from one bundle key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedRequest {
    pub property: String,
    pub key: String,
    pub args: Vec<Value>,
}

impl KeyedRequest {
    #[must_use]
    pub fn new(property: impl Into<String>, key: impl Into<String>) -> Self {
        Self { property: property.into(), key: key.into(), args: Vec::new() }
    }

    #[must_use]
    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }
}

/// The i18n property as written on a component.
///
/// - `"hello"`: the content property, no arguments
/// - `{"role": "role"}` / `{"children": "args", "args": [1, "abc"]}`
/// - an array of objects
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum I18nProp {
    Key(String),
    One(Map<String, Value>),
    Many(Vec<Map<String, Value>>),
}

impl I18nProp {
    /// Expands the property into requests, in order.
    ///
    /// # Errors
    /// Returns [`I18nError::InvalidRequest`] if an object does not name exactly
    /// one property with a string key, or `args` is not an array.
    pub fn into_requests(self, content_property: &str) -> Result<Vec<KeyedRequest>, I18nError> {
        match self {
            Self::Key(key) => Ok(vec![KeyedRequest::new(content_property, key)]),
            Self::One(object) => Ok(vec![request_from_object(object)?]),
            Self::Many(objects) => objects.into_iter().map(request_from_object).collect(),
        }
    }
}

fn request_from_object(mut object: Map<String, Value>) -> Result<KeyedRequest, I18nError> {
    let args = match object.remove(ARGS_KEY) {
        None => Vec::new(),
        Some(Value::Array(args)) => args,
        Some(other) => {
            return Err(I18nError::InvalidRequest(format!("'args' must be an array, got {other}")));
        }
    };

    let mut entries = object.into_iter();
    let (property, key) = match (entries.next(), entries.next()) {
        (Some((property, Value::String(key))), None) => (property, key),
        (Some((property, other)), None) => {
            return Err(I18nError::InvalidRequest(format!(
                "key for '{property}' must be a string, got {other}"
            )));
        }
        (None, _) => {
            return Err(I18nError::InvalidRequest("no property named".to_string()));
        }
        (Some(_), Some(_)) => {
            return Err(I18nError::InvalidRequest(
                "exactly one property per request is allowed".to_string(),
            ));
        }
    };

    Ok(KeyedRequest { property, key, args })
}
