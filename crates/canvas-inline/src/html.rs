//! Token stream to HTML fragment serialization.

use std::fmt::Write;

use crate::token::{Token, TokenKind};

/// Escape text for safe inclusion in HTML content or attribute values.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Serialize a token stream to an HTML fragment.
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut out = String::with_capacity(tokens.len() * 8);
    for token in tokens {
        match token.kind {
            TokenKind::Open => {
                out.push('<');
                out.push_str(token.tag);
                for (name, value) in &token.attrs {
                    write!(out, r#" {name}="{}""#, escape_html(value)).unwrap();
                }
                out.push('>');
            }
            TokenKind::Close => {
                out.push_str("</");
                out.push_str(token.tag);
                out.push('>');
            }
            TokenKind::Text => out.push_str(&escape_html(&token.content)),
            TokenKind::Code => {
                write!(out, "<code>{}</code>", escape_html(&token.content)).unwrap();
            }
            TokenKind::Softbreak => out.push('\n'),
        }
    }
    out
}
