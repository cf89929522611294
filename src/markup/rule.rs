//! Markup rules: a pattern plus a classifier turning captures into a span.

use std::fmt;
use std::ops::Range;
use std::sync::{
    Arc,
    LazyLock,
};

use regex::Regex;
use serde::{
    Deserialize,
    Serialize,
};

use super::segment::SpanKind;
use crate::error::MarkupError;

/// Compiles a literal pattern for the built-in rules.
#[allow(clippy::expect_used)]
fn builtin_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in markup pattern must compile")
}

// `regex` has no back-references, so each paired delimiter is its own branch.
static STRONG: LazyLock<Regex> = LazyLock::new(|| builtin_regex(r"\*\*([^_*]*)\*\*|__([^_*]*)__"));
static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| builtin_regex(r"\*([^_*]*)\*|_([^_*]*)_"));
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| builtin_regex(r"`(.*?)`"));
static STRIKETHROUGH: LazyLock<Regex> = LazyLock::new(|| builtin_regex(r"~~(.*?)~~"));
static LINK: LazyLock<Regex> = LazyLock::new(|| builtin_regex(r"\[([^\[]+)\]\(([^)]+)\)"));

/// Capture groups of one match, read from the original text.
#[derive(Debug, Clone, Copy)]
pub struct Captures<'t> {
    text: &'t str,
    groups: &'t [Option<Range<usize>>],
}

impl<'t> Captures<'t> {
    pub(crate) const fn new(text: &'t str, groups: &'t [Option<Range<usize>>]) -> Self {
        Self { text, groups }
    }

    /// Text of group `index` (0 is the whole match).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'t str> {
        self.range(index).and_then(|range| self.text.get(range))
    }

    /// Byte range of group `index` in the original text.
    #[must_use]
    pub fn range(&self, index: usize) -> Option<Range<usize>> {
        self.groups.get(index).cloned().flatten()
    }

    /// First of `indices` whose group participated in the match.
    #[must_use]
    pub fn first_present(&self, indices: &[usize]) -> Option<usize> {
        indices.iter().copied().find(|&index| self.range(index).is_some())
    }

    /// Number of groups, including group 0.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// What a classifier decided about one match.
///
/// `body` names the capture group holding the span's content; enclosed
/// matches inside that group become the span's children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: SpanKind,
    pub body: usize,
    pub target: Option<String>,
}

impl Classification {
    #[must_use]
    pub const fn new(kind: SpanKind, body: usize) -> Self {
        Self { kind, body, target: None }
    }

    #[must_use]
    pub fn with_target(mut self, target: Option<&str>) -> Self {
        self.target = target.map(str::to_string);
        self
    }
}

/// Classifier signature: captures plus the match's positional index.
type ClassifyFn = dyn Fn(&Captures<'_>, usize) -> Classification + Send + Sync;

/// A pattern and the classifier for its matches.
///
/// Rule lists are ordered; earlier rules claim disputed text first.
#[derive(Clone)]
pub struct MarkupRule {
    name: String,
    pattern: Regex,
    classify: Arc<ClassifyFn>,
}

impl fmt::Debug for MarkupRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkupRule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

impl MarkupRule {
    /// Compiles `pattern` into a new rule.
    ///
    /// # Errors
    /// Returns [`MarkupError::InvalidPattern`] if the pattern does not compile.
    pub fn new<F>(name: impl Into<String>, pattern: &str, classify: F) -> Result<Self, MarkupError>
    where
        F: Fn(&Captures<'_>, usize) -> Classification + Send + Sync + 'static,
    {
        let regex = Regex::new(pattern).map_err(|source| MarkupError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self::from_regex(name, regex, classify))
    }

    #[must_use]
    pub fn from_regex<F>(name: impl Into<String>, pattern: Regex, classify: F) -> Self
    where
        F: Fn(&Captures<'_>, usize) -> Classification + Send + Sync + 'static,
    {
        Self { name: name.into(), pattern, classify: Arc::new(classify) }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub(crate) fn classify(&self, captures: &Captures<'_>, index: usize) -> Classification {
        (self.classify)(captures, index)
    }

    /// `**x**` or `__x__`.
    #[must_use]
    pub fn strong() -> Self {
        Self::from_regex("strong", STRONG.clone(), |caps, _| {
            Classification::new(SpanKind::Strong, caps.first_present(&[1, 2]).unwrap_or(1))
        })
    }

    /// `*x*` or `_x_`.
    #[must_use]
    pub fn emphasis() -> Self {
        Self::from_regex("emphasis", EMPHASIS.clone(), |caps, _| {
            Classification::new(SpanKind::Emphasis, caps.first_present(&[1, 2]).unwrap_or(1))
        })
    }

    #[must_use]
    pub fn inline_code() -> Self {
        Self::from_regex("code", INLINE_CODE.clone(), |_, _| Classification::new(SpanKind::Code, 1))
    }

    #[must_use]
    pub fn strikethrough() -> Self {
        Self::from_regex("strikethrough", STRIKETHROUGH.clone(), |_, _| {
            Classification::new(SpanKind::Strikethrough, 1)
        })
    }

    /// `[label](target)`.
    #[must_use]
    pub fn link() -> Self {
        Self::from_regex("link", LINK.clone(), |caps, _| {
            Classification::new(SpanKind::Link, 1).with_target(caps.get(2))
        })
    }
}

/// Names of the built-in rules, as used in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinRule {
    Strong,
    Emphasis,
    Code,
    Strikethrough,
    Link,
}

impl BuiltinRule {
    /// Default priority order.
    pub const DEFAULT_ORDER: [Self; 5] =
        [Self::Strong, Self::Emphasis, Self::Code, Self::Strikethrough, Self::Link];

    #[must_use]
    pub fn rule(self) -> MarkupRule {
        match self {
            Self::Strong => MarkupRule::strong(),
            Self::Emphasis => MarkupRule::emphasis(),
            Self::Code => MarkupRule::inline_code(),
            Self::Strikethrough => MarkupRule::strikethrough(),
            Self::Link => MarkupRule::link(),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Emphasis => "emphasis",
            Self::Code => "code",
            Self::Strikethrough => "strikethrough",
            Self::Link => "link",
        }
    }
}

/// Built-in rules in default priority order.
#[must_use]
pub fn default_rules() -> Vec<MarkupRule> {
    BuiltinRule::DEFAULT_ORDER.into_iter().map(BuiltinRule::rule).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn default_rules_are_in_priority_order() {
        let names: Vec<String> = default_rules().iter().map(|r| r.name().to_string()).collect();

        assert_that!(names, elements_are![eq("strong"), eq("emphasis"), eq("code"), eq("strikethrough"), eq("link")]);
    }

    #[rstest]
    fn invalid_pattern_is_reported() {
        let result = MarkupRule::new("broken", r"(\*", |_, _| Classification::new(SpanKind::Code, 1));

        assert!(matches!(result, Err(MarkupError::InvalidPattern { pattern, .. }) if pattern == r"(\*"));
    }

    #[rstest]
    fn captures_read_from_text() {
        let text = "a [label](url) b";
        let groups = vec![Some(2..14), Some(3..8), Some(10..13), None];
        let caps = Captures::new(text, &groups);

        assert_that!(caps.get(0), some(eq("[label](url)")));
        assert_that!(caps.get(1), some(eq("label")));
        assert_that!(caps.get(2), some(eq("url")));
        assert_that!(caps.get(3), none());
        assert_that!(caps.get(9), none());
        assert_that!(caps.first_present(&[3, 2]), some(eq(2)));
        assert_that!(caps.len(), eq(4));
    }

    #[rstest]
    #[case::strong_stars(BuiltinRule::Strong, "a **b** c", "**b**")]
    #[case::strong_underscores(BuiltinRule::Strong, "a __b__ c", "__b__")]
    #[case::emphasis_star(BuiltinRule::Emphasis, "a *b* c", "*b*")]
    #[case::emphasis_underscore(BuiltinRule::Emphasis, "a _b_ c", "_b_")]
    #[case::code_is_lazy(BuiltinRule::Code, "`a` and `b`", "`a`")]
    #[case::strike_is_lazy(BuiltinRule::Strikethrough, "~~a~~ ~~b~~", "~~a~~")]
    #[case::link(BuiltinRule::Link, "see [docs](http://x.y) now", "[docs](http://x.y)")]
    fn builtin_patterns_match(#[case] builtin: BuiltinRule, #[case] text: &str, #[case] expected: &str) {
        let rule = builtin.rule();

        let found = rule.pattern().find(text).map(|m| m.as_str());

        assert_eq!(found, Some(expected));
    }

    #[rstest]
    fn builtin_rule_deserializes_lowercase() {
        let rules: Vec<BuiltinRule> = serde_json::from_str(r#"["link", "strikethrough"]"#).unwrap();

        assert_that!(rules, elements_are![eq(&BuiltinRule::Link), eq(&BuiltinRule::Strikethrough)]);
    }
}
