//! Default plain-text consumption rule.

use crate::engine::InlineEngine;
use crate::ruler::InlineRule;
use crate::state::InlineState;

/// Consumes a run of characters that no other rule could possibly claim.
///
/// Stops at newlines and ASCII punctuation — every delimiter the pipeline
/// recognizes starts with one, so stopping there is what gives later rules
/// their chance. At a delimiter character this rule matches nothing and the
/// engine falls through the rest of the chain.
pub(crate) struct TextRule;

fn is_terminator(c: char) -> bool {
    c == '\n' || c.is_ascii_punctuation()
}

impl InlineRule for TextRule {
    fn run(&self, _engine: &InlineEngine, state: &mut InlineState<'_>, silent: bool) -> bool {
        let rest = state.rest();
        let len = rest
            .chars()
            .take_while(|&c| !is_terminator(c))
            .map(char::len_utf8)
            .sum::<usize>();
        if len == 0 {
            return false;
        }
        if !silent {
            state.push_pending(&rest[..len]);
        }
        state.pos += len;
        true
    }
}
