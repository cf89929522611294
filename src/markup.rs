//! Inline markdown-style markup: rules, the segmentation engine and output segments.

pub mod engine;
pub mod rule;
pub mod segment;

pub use engine::transform;
pub use rule::{
    BuiltinRule,
    Captures,
    Classification,
    MarkupRule,
    default_rules,
};
pub use segment::{
    Segment,
    SpanKind,
    StyledSpan,
    as_plain,
    plain_text,
    to_html,
};
