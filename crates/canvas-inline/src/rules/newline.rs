//! Soft line break rule.

use crate::engine::InlineEngine;
use crate::ruler::InlineRule;
use crate::state::InlineState;
use crate::token::Token;

pub(crate) struct NewlineRule;

impl InlineRule for NewlineRule {
    fn run(&self, _engine: &InlineEngine, state: &mut InlineState<'_>, silent: bool) -> bool {
        if state.next_char() != Some('\n') {
            return false;
        }
        if !silent {
            state.push(Token::softbreak());
        }
        state.pos += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_newline_becomes_softbreak() {
        let engine = InlineEngine::new();
        let mut state = InlineState::new("\nrest");
        assert!(NewlineRule.run(&engine, &mut state, false));
        assert_eq!(state.pos, 1);
        let tokens = state.into_tokens();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Softbreak);
    }
}
