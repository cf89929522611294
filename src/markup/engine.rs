//! Two-pass markup segmentation.
//!
//! Discovery runs the rules in priority order over a working copy of the
//! text. Every accepted match is blanked with spaces of equal byte length,
//! so later rules can neither re-match nor split text an earlier rule has
//! claimed. Assembly then walks the original text in offset order and
//! classifies each match.
//!
//! Offsets are UTF-8 byte offsets. Blanking replaces whole matches, which
//! always start and end on char boundaries, so the working copy stays valid.

use std::ops::Range;

use super::rule::{
    Captures,
    MarkupRule,
};
use super::segment::{
    Segment,
    StyledSpan,
};
use crate::error::MarkupError;

/// A match found during discovery.
#[derive(Debug)]
struct RecordedMatch<'r> {
    rule: &'r MarkupRule,
    /// Position of the rule in the list; lower claims first.
    priority: usize,
    range: Range<usize>,
    groups: Vec<Option<Range<usize>>>,
}

/// Transform `text` into plain and styled segments using `rules` in order.
///
/// With no rules, or when nothing matches, the result is a single
/// [`Segment::Text`] holding the whole input.
///
/// # Examples
/// ```
/// use scoped_i18n::markup::{MarkupRule, Segment, SpanKind, transform};
///
/// let segments = transform("Some **bold** text", &[MarkupRule::strong()]).unwrap();
/// assert_eq!(
///     segments,
///     vec![
///         Segment::text("Some "),
///         Segment::styled(SpanKind::Strong, "bold"),
///         Segment::text(" text"),
///     ]
/// );
/// ```
///
/// # Errors
/// Returns [`MarkupError::MissingGroup`] when a classifier names a body
/// group that did not take part in its match.
pub fn transform(text: &str, rules: &[MarkupRule]) -> Result<Vec<Segment>, MarkupError> {
    if rules.is_empty() {
        return Ok(vec![Segment::text(text)]);
    }

    let found = discover(text, rules);
    if found.is_empty() {
        return Ok(vec![Segment::text(text)]);
    }

    let mut ordered: Vec<&RecordedMatch<'_>> = found.iter().collect();
    // Enclosing matches sort before the matches they enclose.
    ordered.sort_by(|a, b| a.range.start.cmp(&b.range.start).then(b.range.end.cmp(&a.range.end)));

    let mut assembler = Assembler { text, next_index: 0 };
    assembler.assemble(0..text.len(), &ordered)
}

/// Discovery pass.
fn discover<'r>(text: &str, rules: &'r [MarkupRule]) -> Vec<RecordedMatch<'r>> {
    let mut working = text.to_string();
    let mut found: Vec<RecordedMatch<'r>> = Vec::new();

    for (priority, rule) in rules.iter().enumerate() {
        let mut pos = 0;
        while pos <= working.len() {
            let Some(caps) = rule.pattern().captures_at(&working, pos) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };
            let range = whole.range();

            if range.is_empty() {
                pos = next_char_boundary(&working, range.end);
                continue;
            }
            if !claimable(&found, &range) {
                tracing::trace!(
                    "Rule '{}' skipped {:?}: overlaps an earlier claim",
                    rule.name(),
                    range
                );
                pos = next_char_boundary(&working, range.start);
                continue;
            }

            let groups = caps.iter().map(|group| group.map(|m| m.range())).collect();
            pos = range.end;
            blank(&mut working, &range);
            found.push(RecordedMatch { rule, priority, range, groups });
        }
    }

    found
}

/// A new match may enclose earlier claims but must not cut into or sit inside one.
fn claimable(found: &[RecordedMatch<'_>], range: &Range<usize>) -> bool {
    found.iter().all(|claimed| {
        let disjoint = range.end <= claimed.range.start || claimed.range.end <= range.start;
        disjoint || (encloses(range, &claimed.range) && *range != claimed.range)
    })
}

const fn encloses(outer: &Range<usize>, inner: &Range<usize>) -> bool {
    outer.start <= inner.start && inner.end <= outer.end
}

fn blank(working: &mut String, range: &Range<usize>) {
    working.replace_range(range.clone(), &" ".repeat(range.len()));
}

/// Byte offset of the char after the one starting at `at`, or past the end.
fn next_char_boundary(text: &str, at: usize) -> usize {
    text.get(at..)
        .and_then(|rest| rest.chars().next())
        .map_or(text.len() + 1, |c| at + c.len_utf8())
}

/// Assembly pass state.
struct Assembler<'t> {
    text: &'t str,
    /// Positional index handed to classifiers, in output order.
    next_index: usize,
}

impl Assembler<'_> {
    /// Segments `span` of the original text; `matches` lie inside it, sorted.
    fn assemble(
        &mut self,
        span: Range<usize>,
        matches: &[&RecordedMatch<'_>],
    ) -> Result<Vec<Segment>, MarkupError> {
        let mut segments = Vec::new();
        let mut cursor = span.start;
        let mut rest = matches;

        while let Some((current, tail)) = rest.split_first() {
            let inner_count =
                tail.iter().take_while(|m| m.range.start < current.range.end).count();
            let (inner, after) = tail.split_at(inner_count);

            self.push_text(&mut segments, cursor..current.range.start);
            segments.push(Segment::Styled(self.build(current, inner)?));

            cursor = current.range.end;
            rest = after;
        }

        self.push_text(&mut segments, cursor..span.end);
        Ok(segments)
    }

    fn push_text(&self, segments: &mut Vec<Segment>, range: Range<usize>) {
        if let Some(gap) = self.text.get(range)
            && !gap.is_empty()
        {
            segments.push(Segment::text(gap));
        }
    }

    /// Classifies `current`; `inner` are the matches it encloses.
    fn build(
        &mut self,
        current: &RecordedMatch<'_>,
        inner: &[&RecordedMatch<'_>],
    ) -> Result<StyledSpan, MarkupError> {
        let index = self.next_index;
        self.next_index += 1;

        let captures = Captures::new(self.text, &current.groups);
        let classification = current.rule.classify(&captures, index);
        let body = captures.range(classification.body).ok_or_else(|| MarkupError::MissingGroup {
            rule: current.rule.name().to_string(),
            group: classification.body,
        })?;

        let enclosed: Vec<&RecordedMatch<'_>> =
            inner.iter().copied().filter(|m| encloses(&body, &m.range)).collect();

        // Same content claimed by two rules: the higher-priority kind wraps.
        if let Some((first, rest)) = enclosed.split_first()
            && first.range == body
            && first.priority < current.priority
        {
            let nested = self.build(first, rest)?;
            let inner_span = StyledSpan {
                kind: classification.kind,
                children: nested.children,
                target: classification.target,
            };
            return Ok(StyledSpan {
                kind: nested.kind,
                children: vec![Segment::Styled(inner_span)],
                target: nested.target,
            });
        }

        let children = self.assemble(body, &enclosed)?;
        Ok(StyledSpan { kind: classification.kind, children, target: classification.target })
    }
}
