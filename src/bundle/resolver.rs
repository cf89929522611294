//! Selecting the active language and its bundle.

use crate::error::I18nError;
use crate::types::{
    BundleSet,
    LanguageBundle,
};

/// Pick the declared language, else the inherited one. Empty tags count as unset.
///
/// # Errors
/// Returns [`I18nError::MissingLanguage`] if neither is set.
pub fn resolve_language<'a>(
    declared: Option<&'a str>,
    inherited: Option<&'a str>,
) -> Result<&'a str, I18nError> {
    declared
        .filter(|lang| !lang.is_empty())
        .or_else(|| inherited.filter(|lang| !lang.is_empty()))
        .ok_or(I18nError::MissingLanguage)
}

/// Return the flat bundle of `lang` from a merged bundle set.
///
/// # Errors
/// - [`I18nError::MissingLanguage`] if `lang` is absent or empty
/// - [`I18nError::UnknownLanguage`] if `effective` has no bundle for it
pub fn resolve<'a>(
    effective: &'a BundleSet,
    lang: Option<&str>,
) -> Result<&'a LanguageBundle, I18nError> {
    let lang = resolve_language(lang, None)?;
    effective.get(lang).ok_or_else(|| {
        let mut known: Vec<String> = effective.keys().cloned().collect();
        known.sort_unstable();
        I18nError::UnknownLanguage { lang: lang.to_string(), known }
    })
}
