//! Scan state for one inline parse.
//!
//! The state is created fresh per parse call and owned by the pipeline.
//! Rules read `src`, move `pos` forward on success, and may temporarily
//! narrow `pos_max` to tokenize a sub-range; a failing rule must leave
//! `pos` exactly where it found it.

use crate::token::Token;

/// Mutable scan state shared with every inline rule.
pub struct InlineState<'a> {
    /// Source text being scanned.
    pub src: &'a str,
    /// Current byte position. Always on a char boundary.
    pub pos: usize,
    /// Exclusive upper bound of the scan. Rules tokenizing a sub-range
    /// narrow this and restore it afterwards.
    pub pos_max: usize,
    tokens: Vec<Token>,
    /// Literal text accumulated since the last pushed token. Coalescing
    /// here keeps adjacent plain characters in one text token.
    pending: String,
}

impl<'a> InlineState<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            pos_max: src.len(),
            tokens: Vec::new(),
            pending: String::new(),
        }
    }

    /// Unscanned remainder of the current range.
    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..self.pos_max]
    }

    /// Whether the input at the cursor starts with `literal`.
    pub fn starts_with(&self, literal: &str) -> bool {
        self.rest().starts_with(literal)
    }

    /// Next character in range, if any.
    pub fn next_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Push a token, flushing pending literal text first.
    pub fn push(&mut self, token: Token) {
        self.flush_pending();
        self.tokens.push(token);
    }

    /// Append literal text to the pending buffer.
    pub fn push_pending(&mut self, text: &str) {
        self.pending.push_str(text);
    }

    /// Append a single literal character to the pending buffer.
    pub fn push_pending_char(&mut self, c: char) {
        self.pending.push(c);
    }

    /// Convert accumulated pending text into a text token.
    pub fn flush_pending(&mut self) {
        if !self.pending.is_empty() {
            let text = std::mem::take(&mut self.pending);
            self.tokens.push(Token::text(text));
        }
    }

    /// Finish the parse and hand back the token stream.
    pub fn into_tokens(mut self) -> Vec<Token> {
        self.flush_pending();
        self.tokens
    }

    #[cfg(test)]
    pub(crate) fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pending_flushes_before_push() {
        let mut state = InlineState::new("ab**");
        state.push_pending("ab");
        state.push(Token::open("strong", "**"));

        assert_eq!(state.tokens().len(), 2);
        assert_eq!(state.tokens()[0].kind, TokenKind::Text);
        assert_eq!(state.tokens()[0].content, "ab");
        assert_eq!(state.tokens()[1].kind, TokenKind::Open);
    }

    #[test]
    fn test_into_tokens_flushes_trailing_pending() {
        let mut state = InlineState::new("tail");
        state.push_pending("tail");
        let tokens = state.into_tokens();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].content, "tail");
    }

    #[test]
    fn test_rest_respects_pos_max() {
        let mut state = InlineState::new("abcdef");
        state.pos = 1;
        state.pos_max = 4;
        assert_eq!(state.rest(), "bcd");
        assert!(state.starts_with("bc"));
        assert_eq!(state.next_char(), Some('b'));
    }
}
