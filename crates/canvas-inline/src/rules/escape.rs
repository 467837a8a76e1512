//! Backslash escape rule.

use crate::engine::InlineEngine;
use crate::ruler::InlineRule;
use crate::state::InlineState;

/// `\X` where X is ASCII punctuation becomes literal X. A backslash before
/// anything else is left for the fallback to emit literally.
pub(crate) struct EscapeRule;

impl InlineRule for EscapeRule {
    fn run(&self, _engine: &InlineEngine, state: &mut InlineState<'_>, silent: bool) -> bool {
        if state.next_char() != Some('\\') {
            return false;
        }
        let Some(escaped) = state.rest()[1..].chars().next() else {
            return false;
        };
        if !escaped.is_ascii_punctuation() {
            return false;
        }
        if !silent {
            state.push_pending_char(escaped);
        }
        state.pos += 1 + escaped.len_utf8();
        true
    }
}
