//! Symmetric-delimiter extension tokenizer.
//!
//! One [`ShortcutRule`] is built per registered decorator, binding that
//! decorator's shortcut and tag. The rule matches a span that opens and
//! closes with the exact shortcut string, emits an open/text/close token
//! triple, and otherwise leaves the cursor untouched so the next rule in
//! the chain can try.

use crate::decorator::Decorator;
use crate::engine::InlineEngine;
use crate::ruler::InlineRule;
use crate::state::InlineState;
use crate::token::Token;

/// Inline rule for one symmetric shortcut (`^sup^`, `::kbd::`, …).
pub(crate) struct ShortcutRule {
    shortcut: &'static str,
    tag: &'static str,
}

impl ShortcutRule {
    pub fn new(decorator: &Decorator) -> Self {
        Self {
            shortcut: decorator.shortcut,
            tag: decorator.tag,
        }
    }
}

impl InlineRule for ShortcutRule {
    fn run(&self, engine: &InlineEngine, state: &mut InlineState<'_>, silent: bool) -> bool {
        if !state.starts_with(self.shortcut) {
            return false;
        }
        // Never validate in lookahead passes; the span can still match at
        // commit time.
        if silent {
            return false;
        }
        let len = self.shortcut.len();
        let start = state.pos;
        // Opening marker, content, closing marker can never fit in less
        // than twice the marker length.
        if state.pos_max - start < 2 * len {
            return false;
        }

        state.pos += len;
        let mut found = None;
        while state.pos < state.pos_max {
            if state.starts_with(self.shortcut) {
                found = Some(state.pos);
                break;
            }
            // Token-wise scan: nested constructs are skipped whole, so a
            // closing marker inside e.g. a link destination is not taken.
            engine.skip_token(state);
        }

        let content_start = start + len;
        match found {
            Some(end) if end > content_start => {
                let content = unescape(&state.src[content_start..end]);
                state.push(Token::open(self.tag, self.shortcut));
                state.push(Token::text(content));
                state.push(Token::close(self.tag, self.shortcut));
                state.pos = end + len;
                true
            }
            // Unterminated or zero-length span: restore the cursor, emit
            // nothing.
            _ => {
                state.pos = start;
                false
            }
        }
    }
}

/// Resolve backslash escapes of ASCII punctuation in a raw span slice.
///
/// Runs once over the slice, never recursively. Nested constructs inside
/// the span were only skipped during the scan, not descended into, so the
/// slice is still raw source text at this point.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&next) = chars.peek()
            && next.is_ascii_punctuation()
        {
            out.push(next);
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;
    use pretty_assertions::assert_eq;

    fn rule(shortcut: &'static str, tag: &'static str) -> ShortcutRule {
        ShortcutRule { shortcut, tag }
    }

    fn run_rule(shortcut: &'static str, tag: &'static str, src: &str) -> (bool, Vec<Token>, usize) {
        let engine = InlineEngine::new();
        let mut state = InlineState::new(src);
        let matched = rule(shortcut, tag).run(&engine, &mut state, false);
        let pos = state.pos;
        (matched, state.into_tokens(), pos)
    }

    #[test]
    fn test_simple_span_emits_triple() {
        let (matched, tokens, pos) = run_rule("^", "sup", "^x^");
        assert!(matched);
        assert_eq!(pos, 3);
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].kind, TokenKind::Open);
        assert_eq!(tokens[0].tag, "sup");
        assert_eq!(tokens[0].markup, "^");
        assert_eq!(tokens[1].kind, TokenKind::Text);
        assert_eq!(tokens[1].content, "x");
        assert_eq!(tokens[2].kind, TokenKind::Close);
        assert_eq!(tokens[2].tag, "sup");
    }

    #[test]
    fn test_multichar_shortcut() {
        let (matched, tokens, _) = run_rule("::", "kbd", "::Ctrl::");
        assert!(matched);
        assert_eq!(tokens[1].content, "Ctrl");
        assert_eq!(tokens[0].markup, "::");
    }

    #[test]
    fn test_zero_length_span_rejected() {
        for (shortcut, tag) in [("^", "sup"), ("::", "kbd"), ("==", "mark")] {
            let src = format!("{shortcut}{shortcut}");
            let engine = InlineEngine::new();
            let mut state = InlineState::new(&src);
            let matched = rule(shortcut, tag).run(&engine, &mut state, false);
            assert!(!matched, "{shortcut} matched an empty span");
            assert_eq!(state.pos, 0, "{shortcut} moved the cursor on failure");
            assert!(state.into_tokens().is_empty());
        }
    }

    #[test]
    fn test_input_shorter_than_two_markers_rejected() {
        let (matched, tokens, pos) = run_rule("::", "kbd", "::x");
        assert!(!matched);
        assert_eq!(pos, 0);
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_unterminated_span_restores_cursor() {
        let (matched, _, pos) = run_rule("==", "mark", "==unclosed and more text");
        assert!(!matched);
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_wrong_start_fails_without_moving() {
        let (matched, _, pos) = run_rule("^", "sup", "plain ^x^");
        assert!(!matched);
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_silent_mode_always_fails() {
        let engine = InlineEngine::new();
        let mut state = InlineState::new("^x^");
        let matched = rule("^", "sup").run(&engine, &mut state, true);
        assert!(!matched);
        assert_eq!(state.pos, 0);
    }

    #[test]
    fn test_escaped_punctuation_unescaped_once() {
        let (matched, tokens, _) = run_rule("~~", "s", r"~~a\*b~~");
        assert!(matched);
        assert_eq!(tokens[1].content, "a*b");
    }

    #[test]
    fn test_escaped_backslash_and_hyphen() {
        let (_, tokens, _) = run_rule("==", "mark", r"==a\\b\-c==");
        assert_eq!(tokens[1].content, r"a\b-c");
    }

    #[test]
    fn test_backslash_before_non_punctuation_kept() {
        let (_, tokens, _) = run_rule("==", "mark", r"==a\bc==");
        assert_eq!(tokens[1].content, r"a\bc");
    }

    #[test]
    fn test_nested_link_skipped_as_one_unit() {
        // The `==` inside the link destination must not close the span.
        let src = "==a [b](https://x.test/==c) d==";
        let (matched, tokens, pos) = run_rule("==", "mark", src);
        assert!(matched);
        assert_eq!(tokens[1].content, "a [b](https://x.test/==c) d");
        assert_eq!(pos, src.len());
    }

    #[test]
    fn test_nested_code_span_skipped_as_one_unit() {
        let src = "++key `a++b` end++";
        let (matched, tokens, _) = run_rule("++", "ins", src);
        assert!(matched);
        assert_eq!(tokens[1].content, "key `a++b` end");
    }

    #[test]
    fn test_content_is_raw_not_retokenized() {
        // Content is a single text token; nested markup stays literal.
        let (matched, tokens, _) = run_rule("==", "mark", "==a **b** c==");
        assert!(matched);
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].content, "a **b** c");
    }

    #[test]
    fn test_unescape_only_punctuation() {
        assert_eq!(unescape(r"\*\~\["), "*~[");
        assert_eq!(unescape(r"a\\b"), r"a\b");
        assert_eq!(unescape(r"\x\1"), r"\x\1");
        assert_eq!(unescape(r"trailing\"), r"trailing\");
    }
}
