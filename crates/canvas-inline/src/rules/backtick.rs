//! Native inline code span rule.

use super::run_length;
use crate::engine::InlineEngine;
use crate::ruler::InlineRule;
use crate::state::InlineState;
use crate::token::Token;

/// A run of N backticks opens a code span closed by the next run of
/// exactly N backticks. An unclosed opener degrades to literal text.
pub(crate) struct BacktickRule;

impl InlineRule for BacktickRule {
    fn run(&self, _engine: &InlineEngine, state: &mut InlineState<'_>, silent: bool) -> bool {
        if state.next_char() != Some('`') {
            return false;
        }
        let start = state.pos;
        let n = run_length(state.src, start, state.pos_max, b'`');
        let opener = &state.src[start..start + n];

        let bytes = state.src.as_bytes();
        let mut i = start + n;
        let mut closer = None;
        while i < state.pos_max {
            if bytes[i] == b'`' {
                let m = run_length(state.src, i, state.pos_max, b'`');
                if m == n {
                    closer = Some(i);
                    break;
                }
                i += m;
            } else {
                i += 1;
            }
        }

        let Some(end) = closer else {
            // No closer: the opener run is literal text.
            if !silent {
                state.push_pending(opener);
            }
            state.pos = start + n;
            return true;
        };

        let mut content = state.src[start + n..end].replace('\n', " ");
        // CommonMark: strip one space from both ends when the content has
        // a non-space character and is padded on both sides.
        if content.len() >= 2
            && content.starts_with(' ')
            && content.ends_with(' ')
            && content.chars().any(|c| c != ' ')
        {
            content = content[1..content.len() - 1].to_owned();
        }
        if !silent {
            state.push(Token::code(content, opener));
        }
        state.pos = end + n;
        true
    }
}
