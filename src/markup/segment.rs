//! Output segments of the markup engine and their flat renderings.

/// Kind of a styled span.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Strong,
    Emphasis,
    Code,
    Strikethrough,
    Link,
    /// Kind produced by a caller-authored rule.
    Custom(String),
}

impl SpanKind {
    /// HTML element used by [`to_html`].
    #[must_use]
    pub const fn html_tag(&self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Emphasis => "em",
            Self::Code => "code",
            Self::Strikethrough => "del",
            Self::Link => "a",
            Self::Custom(_) => "span",
        }
    }
}

/// One classified unit of transformed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Styled(StyledSpan),
}

impl Segment {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Styled span whose content is a single text run.
    #[must_use]
    pub fn styled(kind: SpanKind, content: impl Into<String>) -> Self {
        Self::Styled(StyledSpan::new(kind, vec![Self::text(content)]))
    }
}

/// A styled region. `target` carries auxiliary data such as a link href.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub kind: SpanKind,
    pub children: Vec<Segment>,
    pub target: Option<String>,
}

impl StyledSpan {
    #[must_use]
    pub const fn new(kind: SpanKind, children: Vec<Segment>) -> Self {
        Self { kind, children, target: None }
    }

    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Visible text of the span, without delimiters.
    #[must_use]
    pub fn plain_text(&self) -> String {
        plain_text(&self.children)
    }
}

/// Returns the text if the sequence is a single unstyled run.
#[must_use]
pub fn as_plain(segments: &[Segment]) -> Option<&str> {
    match segments {
        [Segment::Text(text)] => Some(text),
        _ => None,
    }
}

/// Concatenates the visible text of all segments.
#[must_use]
pub fn plain_text(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Styled(span) => out.push_str(&span.plain_text()),
        }
    }
    out
}

/// Renders segments as HTML with text and attributes escaped.
///
/// # Examples
/// ```
/// use scoped_i18n::markup::{Segment, SpanKind, to_html};
///
/// let segments = vec![
///     Segment::text("Some "),
///     Segment::styled(SpanKind::Strong, "bold"),
///     Segment::text(" <text>"),
/// ];
/// assert_eq!(to_html(&segments), "Some <strong>bold</strong> &lt;text&gt;");
/// ```
#[must_use]
pub fn to_html(segments: &[Segment]) -> String {
    let mut out = String::new();
    write_html(&mut out, segments);
    out
}

fn write_html(out: &mut String, segments: &[Segment]) {
    for segment in segments {
        match segment {
            Segment::Text(text) => push_escaped(out, text),
            Segment::Styled(span) => {
                let tag = span.kind.html_tag();
                out.push('<');
                out.push_str(tag);
                if let SpanKind::Custom(name) = &span.kind {
                    out.push_str(" class=\"");
                    push_escaped(out, name);
                    out.push('"');
                }
                if let Some(target) = &span.target {
                    out.push_str(" href=\"");
                    push_escaped(out, target);
                    out.push('"');
                }
                out.push('>');
                write_html(out, &span.children);
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn html_for_nested_spans() {
        let segments = vec![Segment::Styled(StyledSpan::new(
            SpanKind::Strong,
            vec![Segment::styled(SpanKind::Emphasis, "bold italic")],
        ))];

        assert_that!(to_html(&segments), eq("<strong><em>bold italic</em></strong>"));
        assert_that!(plain_text(&segments), eq("bold italic"));
    }

    #[rstest]
    fn html_escapes_link_target() {
        let link = StyledSpan::new(SpanKind::Link, vec![Segment::text("a & b")])
            .with_target("x?a=1&b=\"2\"");

        assert_that!(
            to_html(&[Segment::Styled(link)]),
            eq(r#"<a href="x?a=1&amp;b=&quot;2&quot;">a &amp; b</a>"#)
        );
    }

    #[rstest]
    fn html_for_custom_kind() {
        let segments = vec![Segment::styled(SpanKind::Custom("mention".to_string()), "@ann")];

        assert_that!(to_html(&segments), eq(r#"<span class="mention">@ann</span>"#));
    }

    #[rstest]
    #[case::single_text(vec![Segment::text("hi")], Some("hi"))]
    #[case::empty(vec![], None)]
    #[case::styled(vec![Segment::styled(SpanKind::Code, "x")], None)]
    fn test_as_plain(#[case] segments: Vec<Segment>, #[case] expected: Option<&str>) {
        assert_eq!(as_plain(&segments), expected);
    }
}
