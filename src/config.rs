//! Settings: key separator, content property and markup rule selection.
/// Config file loader
mod loader;
/// Configuration types and settings
mod types;

pub use loader::load_settings;
pub use types::{
    ConfigError,
    DEFAULT_CONTENT_PROPERTY,
    I18nSettings,
    MarkupSettings,
    ValidationError,
};
