//! Native emphasis, strong, and strikethrough rule.

use super::run_length;
use crate::engine::InlineEngine;
use crate::ruler::InlineRule;
use crate::state::InlineState;
use crate::token::Token;

/// Matches symmetric marker runs: `*`/`_` for emphasis, doubled for strong,
/// `~~` for strikethrough. The closing run must have the same length as the
/// opener; span content is tokenized recursively.
pub(crate) struct EmphasisRule;

impl InlineRule for EmphasisRule {
    fn run(&self, engine: &InlineEngine, state: &mut InlineState<'_>, silent: bool) -> bool {
        let Some(marker) = state.next_char() else {
            return false;
        };
        if !matches!(marker, '*' | '_' | '~') {
            return false;
        }
        // Cannot validate without scanning to the closer; let skip_token
        // fall back to single characters instead.
        if silent {
            return false;
        }

        let start = state.pos;
        let byte = marker as u8;
        let run = run_length(state.src, start, state.pos_max, byte);
        if marker == '~' && run != 2 {
            return false;
        }

        let content_start = start + run;
        if !can_open(state.src, marker, start, content_start, state.pos_max) {
            return false;
        }
        state.pos = content_start;
        let mut closer = None;
        while state.pos < state.pos_max {
            if state.next_char() == Some(marker) {
                let m = run_length(state.src, state.pos, state.pos_max, byte);
                if m == run
                    && state.pos > content_start
                    && can_close(state.src, marker, state.pos, state.pos + m)
                {
                    closer = Some(state.pos);
                    break;
                }
                state.pos += m;
            } else {
                engine.skip_token(state);
            }
        }

        let Some(end) = closer else {
            state.pos = start;
            return false;
        };

        let markup = &state.src[start..content_start];
        let (outer, nested) = match (marker, run) {
            ('~', _) => ("s", None),
            (_, 1) => ("em", None),
            (_, 2) => ("strong", None),
            _ => ("em", Some("strong")),
        };

        state.push(Token::open(outer, markup));
        if let Some(tag) = nested {
            state.push(Token::open(tag, markup));
        }

        let saved_max = state.pos_max;
        state.pos = content_start;
        state.pos_max = end;
        engine.tokenize(state);
        state.pos_max = saved_max;
        state.pos = end + run;

        if let Some(tag) = nested {
            state.push(Token::close(tag, markup));
        }
        state.push(Token::close(outer, markup));
        true
    }
}

/// An opening run must be followed by non-whitespace content. `_` runs
/// additionally must not sit inside a word, which keeps identifiers like
/// `a_b_c` literal.
fn can_open(src: &str, marker: char, run_start: usize, run_end: usize, max: usize) -> bool {
    let followed = src[run_end..max].chars().next().is_some_and(|c| !c.is_whitespace());
    if !followed {
        return false;
    }
    marker != '_'
        || !src[..run_start]
            .chars()
            .next_back()
            .is_some_and(char::is_alphanumeric)
}

/// A closing run must be preceded by non-whitespace content; `_` runs must
/// not continue into a word.
fn can_close(src: &str, marker: char, run_start: usize, run_end: usize) -> bool {
    let preceded = src[..run_start].chars().next_back().is_some_and(|c| !c.is_whitespace());
    if !preceded {
        return false;
    }
    marker != '_' || !src[run_end..].chars().next().is_some_and(char::is_alphanumeric)
}
