//! Resolving keyed requests against a flat bundle.

use crate::error::MarkupError;
use crate::markup::{
    MarkupRule,
    Segment,
    as_plain,
    to_html,
    transform,
};
use crate::types::LanguageBundle;

use super::request::KeyedRequest;

/// What one property receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedOutput {
    /// Nothing matched; assign as-is.
    Plain(String),
    Segments(Vec<Segment>),
    /// Rendered markup for the content property, already escaped.
    Html(String),
}

/// Resolves requests against one language bundle.
#[derive(Debug, Clone, Copy)]
pub struct ValueResolver<'a> {
    bundle: &'a LanguageBundle,
    rules: &'a [MarkupRule],
    content_property: &'a str,
}

impl<'a> ValueResolver<'a> {
    #[must_use]
    pub const fn new(
        bundle: &'a LanguageBundle,
        rules: &'a [MarkupRule],
        content_property: &'a str,
    ) -> Self {
        Self { bundle, rules, content_property }
    }

    /// Resolve every request, in order, to `(property, output)`.
    ///
    /// Keys missing from the bundle are skipped, so the property stays unset.
    ///
    /// # Errors
    /// Propagates markup rule failures.
    pub fn resolve_all(
        &self,
        requests: &[KeyedRequest],
    ) -> Result<Vec<(String, ResolvedOutput)>, MarkupError> {
        let mut resolved = Vec::with_capacity(requests.len());
        for request in requests {
            if let Some(output) = self.resolve(request)? {
                resolved.push((request.property.clone(), output));
            }
        }
        Ok(resolved)
    }

    /// Resolve one request; `None` if its key is not in the bundle.
    ///
    /// # Errors
    /// Propagates markup rule failures.
    pub fn resolve(&self, request: &KeyedRequest) -> Result<Option<ResolvedOutput>, MarkupError> {
        let Some(value) = self.bundle.get(&request.key) else {
            tracing::debug!(
                "Key '{}' not found for property '{}', leaving it unset",
                request.key,
                request.property
            );
            return Ok(None);
        };

        let text = value.render(&request.args);
        let segments = transform(&text, self.rules)?;

        let output = if request.property == self.content_property {
            ResolvedOutput::Html(to_html(&segments))
        } else if let Some(plain) = as_plain(&segments) {
            ResolvedOutput::Plain(plain.to_string())
        } else {
            ResolvedOutput::Segments(segments)
        };
        Ok(Some(output))
    }
}
