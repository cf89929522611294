use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::markup::{
    BuiltinRule,
    MarkupRule,
};

/// Property that receives pre-rendered markup when a request names no property.
pub const DEFAULT_CONTENT_PROPERTY: &str = "children";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "markup.rules[2]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    /// Joins nested bundle keys when flattening.
    pub key_separator: String,

    /// Property whose output is rendered markup rather than segments.
    pub content_property: String,

    pub markup: MarkupSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkupSettings {
    /// `false` turns every resolved value into plain text.
    pub enabled: bool,

    /// Built-in rules in priority order (first claims first).
    pub rules: Vec<BuiltinRule>,
}

impl Default for MarkupSettings {
    fn default() -> Self {
        Self { enabled: true, rules: BuiltinRule::DEFAULT_ORDER.to_vec() }
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            key_separator: ".".to_string(),
            content_property: DEFAULT_CONTENT_PROPERTY.to_string(),
            markup: MarkupSettings::default(),
        }
    }
}

impl I18nSettings {
    /// # Errors
    /// - Empty separator or content property
    /// - The same rule listed twice
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if self.content_property.is_empty() {
            errors.push(ValidationError::new(
                "contentProperty",
                "The content property cannot be empty. Example: \"children\"",
            ));
        }

        for (index, rule) in self.markup.rules.iter().enumerate() {
            if self.markup.rules.iter().take(index).any(|earlier| earlier == rule) {
                errors.push(ValidationError::new(
                    format!("markup.rules[{index}]"),
                    format!("Rule '{}' is listed more than once", rule.as_str()),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Markup rules in configured priority order; empty when markup is disabled.
    #[must_use]
    pub fn markup_rules(&self) -> Vec<MarkupRule> {
        if !self.markup.enabled {
            return Vec::new();
        }
        self.markup.rules.iter().copied().map(BuiltinRule::rule).collect()
    }
}
