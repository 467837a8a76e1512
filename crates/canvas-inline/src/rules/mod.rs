//! Built-in inline rules of the base pipeline.
//!
//! These cover the markup the delimiter table marks as non-extension
//! (emphasis, strong, strikethrough, inline code) plus the plumbing rules
//! every inline pipeline needs: plain-text consumption, soft breaks,
//! backslash escapes, links, and images. Extension rules are registered
//! ahead of the text rule at the head of this chain.

mod backtick;
mod emphasis;
mod escape;
mod link;
mod newline;
mod text;

pub(crate) use backtick::BacktickRule;
pub(crate) use emphasis::EmphasisRule;
pub(crate) use escape::EscapeRule;
pub(crate) use link::{ImageRule, LinkRule};
pub(crate) use newline::NewlineRule;
pub(crate) use text::TextRule;

/// Count how many times `marker` repeats in `src` starting at `pos`.
pub(crate) fn run_length(src: &str, pos: usize, end: usize, marker: u8) -> usize {
    src.as_bytes()[pos..end]
        .iter()
        .take_while(|&&b| b == marker)
        .count()
}
