//! Native inline link and image rules: `[label](destination "title")` and
//! `![alt](destination "title")`.

use crate::engine::InlineEngine;
use crate::ruler::InlineRule;
use crate::state::InlineState;
use crate::token::Token;

pub(crate) struct LinkRule;

impl InlineRule for LinkRule {
    fn run(&self, engine: &InlineEngine, state: &mut InlineState<'_>, silent: bool) -> bool {
        if state.next_char() != Some('[') {
            return false;
        }
        let start = state.pos;
        state.pos += 1;
        let label_start = state.pos;

        let Some(label_end) = scan_label_end(engine, state) else {
            state.pos = start;
            return false;
        };
        let Some((href, title)) = parse_inline_suffix(state) else {
            state.pos = start;
            return false;
        };

        if silent {
            return true;
        }

        let end_pos = state.pos;
        let mut open = Token::open("a", "").with_attr("href", href);
        if let Some(title) = title {
            open = open.with_attr("title", title);
        }
        state.push(open);

        let saved_max = state.pos_max;
        state.pos = label_start;
        state.pos_max = label_end;
        engine.tokenize(state);
        state.pos_max = saved_max;
        state.pos = end_pos;

        state.push(Token::close("a", ""));
        true
    }
}

/// Images are atomic: the alt text goes into an attribute, so nested
/// markup inside the label is never tokenized.
pub(crate) struct ImageRule;

impl InlineRule for ImageRule {
    fn run(&self, engine: &InlineEngine, state: &mut InlineState<'_>, silent: bool) -> bool {
        if !state.starts_with("![") {
            return false;
        }
        let start = state.pos;
        state.pos += 2;
        let alt_start = state.pos;

        let Some(alt_end) = scan_label_end(engine, state) else {
            state.pos = start;
            return false;
        };
        let Some((src, title)) = parse_inline_suffix(state) else {
            state.pos = start;
            return false;
        };

        if silent {
            return true;
        }

        let mut token = Token::open("img", "").with_attr("src", src);
        if let Some(title) = title {
            token = token.with_attr("title", title);
        }
        let alt = &state.src[alt_start..alt_end];
        state.push(token.with_attr("alt", alt));
        true
    }
}

/// Scan a bracketed label. The cursor starts just past the opening `[` and
/// finishes just past the matching `]`; returns the closing bracket's
/// offset. Nested constructs are skipped atomically so a bracket inside
/// e.g. a code span never closes the label.
fn scan_label_end(engine: &InlineEngine, state: &mut InlineState<'_>) -> Option<usize> {
    let mut depth: usize = 1;
    while state.pos < state.pos_max {
        match state.next_char() {
            Some('[') => {
                depth += 1;
                state.pos += 1;
            }
            Some(']') => {
                depth -= 1;
                state.pos += 1;
                if depth == 0 {
                    return Some(state.pos - 1);
                }
            }
            Some('\\') => match state.rest().chars().nth(1) {
                Some(escaped) => state.pos += 1 + escaped.len_utf8(),
                None => state.pos += 1,
            },
            Some(_) => engine.skip_token(state),
            None => break,
        }
    }
    None
}

/// Parse the `(destination "title")` tail shared by links and images,
/// leaving the cursor past the closing parenthesis.
fn parse_inline_suffix(state: &mut InlineState<'_>) -> Option<(String, Option<String>)> {
    if state.next_char() != Some('(') {
        return None;
    }
    state.pos += 1;
    skip_spaces(state);
    let href = parse_destination(state)?;
    skip_spaces(state);
    let title = parse_title(state);
    skip_spaces(state);
    if state.next_char() != Some(')') {
        return None;
    }
    state.pos += 1;
    Some((href, title))
}

fn skip_spaces(state: &mut InlineState<'_>) {
    while matches!(state.next_char(), Some(' ' | '\t')) {
        state.pos += 1;
    }
}

/// Destination: `<...>` form, or a run without whitespace with balanced
/// parentheses. Returns `None` on an empty destination.
fn parse_destination(state: &mut InlineState<'_>) -> Option<String> {
    let rest = state.rest();
    if rest.starts_with('<') {
        let end = rest.find('>')?;
        let dest = &rest[1..end];
        if dest.contains('\n') {
            return None;
        }
        state.pos += end + 1;
        return Some(dest.to_owned());
    }

    let bytes = rest.as_bytes();
    let mut depth: usize = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\t' | b'\n' => break,
            b'(' => {
                depth += 1;
                i += 1;
            }
            b')' => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                i += 1;
            }
            b'\\' if i + 1 < bytes.len() => i += 2,
            _ => i += 1,
        }
    }
    if i == 0 {
        return None;
    }
    let dest = rest[..i].to_owned();
    state.pos += i;
    Some(dest)
}

/// Optional double-quoted title after the destination.
fn parse_title(state: &mut InlineState<'_>) -> Option<String> {
    let rest = state.rest();
    if !rest.starts_with('"') {
        return None;
    }
    let bytes = rest.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                let title = rest[1..i].to_owned();
                state.pos += i + 1;
                return Some(title);
            }
            b'\\' if i + 1 < bytes.len() => i += 2,
            _ => i += 1,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;
    use pretty_assertions::assert_eq;

    fn run(src: &str) -> (bool, Vec<Token>, usize) {
        let engine = InlineEngine::new();
        let mut state = InlineState::new(src);
        let matched = LinkRule.run(&engine, &mut state, false);
        let pos = state.pos;
        (matched, state.into_tokens(), pos)
    }

    #[test]
    fn test_simple_link() {
        let (matched, tokens, pos) = run("[docs](https://example.test)");
        assert!(matched);
        assert_eq!(pos, 28);
        assert_eq!(tokens[0].tag, "a");
        assert_eq!(tokens[0].attrs, vec![("href", "https://example.test".to_owned())]);
        assert_eq!(tokens[1].content, "docs");
        assert_eq!(tokens[2].kind, TokenKind::Close);
    }

    #[test]
    fn test_link_with_title() {
        let (matched, tokens, _) = run(r#"[d](https://e.test "hi")"#);
        assert!(matched);
        assert_eq!(tokens[0].attrs.len(), 2);
        assert_eq!(tokens[0].attrs[1], ("title", "hi".to_owned()));
    }

    #[test]
    fn test_angle_destination() {
        let (matched, tokens, _) = run("[d](<https://e.test/a b>)");
        assert!(matched);
        assert_eq!(tokens[0].attrs[0].1, "https://e.test/a b");
    }

    #[test]
    fn test_balanced_parens_in_destination() {
        let (matched, tokens, _) = run("[d](https://e.test/a(b))");
        assert!(matched);
        assert_eq!(tokens[0].attrs[0].1, "https://e.test/a(b)");
    }

    #[test]
    fn test_missing_destination_fails() {
        let (matched, _, pos) = run("[just brackets]");
        assert!(!matched);
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_silent_skips_whole_link() {
        let engine = InlineEngine::new();
        let mut state = InlineState::new("[a](https://e.test) tail");
        assert!(LinkRule.run(&engine, &mut state, true));
        assert_eq!(state.pos, 19);
        assert!(state.into_tokens().is_empty());
    }

    #[test]
    fn test_label_is_tokenized() {
        let (matched, tokens, _) = run("[a `c`](https://e.test)");
        assert!(matched);
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Open, TokenKind::Text, TokenKind::Code, TokenKind::Close]
        );
    }

    fn run_image(src: &str) -> (bool, Vec<Token>, usize) {
        let engine = InlineEngine::new();
        let mut state = InlineState::new(src);
        let matched = ImageRule.run(&engine, &mut state, false);
        let pos = state.pos;
        (matched, state.into_tokens(), pos)
    }

    #[test]
    fn test_simple_image() {
        let (matched, tokens, _) = run_image("![alt text](https://e.test/i.png)");
        assert!(matched);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Open);
        assert_eq!(tokens[0].tag, "img");
        assert_eq!(
            tokens[0].attrs,
            vec![
                ("src", "https://e.test/i.png".to_owned()),
                ("alt", "alt text".to_owned()),
            ]
        );
    }

    #[test]
    fn test_image_with_title() {
        let (matched, tokens, _) = run_image(r#"![a](i.png "hi")"#);
        assert!(matched);
        assert_eq!(
            tokens[0].attrs,
            vec![
                ("src", "i.png".to_owned()),
                ("title", "hi".to_owned()),
                ("alt", "a".to_owned()),
            ]
        );
    }

    #[test]
    fn test_image_without_destination_fails() {
        let (matched, tokens, pos) = run_image("![just alt]");
        assert!(!matched);
        assert!(tokens.is_empty());
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_image_silent_skips_whole() {
        let engine = InlineEngine::new();
        let mut state = InlineState::new("![a](i.png) tail");
        assert!(ImageRule.run(&engine, &mut state, true));
        assert_eq!(state.pos, 11);
        assert!(state.into_tokens().is_empty());
    }
}
