//! Inline token stream model.
//!
//! A matched decorator span produces exactly three tokens: an open token,
//! a text token with the span content, and a close token. Open and close
//! tokens record the literal shortcut that produced them in `markup` so the
//! source form survives for round-tripping and debugging.

/// Kind of an inline token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TokenKind {
    /// Opening tag, e.g. `<sup>`.
    Open,
    /// Closing tag, e.g. `</sup>`.
    Close,
    /// Plain text content (HTML-escaped on serialization).
    Text,
    /// Inline code span content.
    Code,
    /// Soft line break.
    Softbreak,
}

/// One token in the inline stream.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token {
    pub kind: TokenKind,
    /// Markup tag name (`strong`, `sup`, `a`, …). Empty for text and breaks.
    pub tag: &'static str,
    /// Literal source delimiter that produced this token (`**`, `::`, …).
    pub markup: String,
    /// Tag attributes, serialized in order.
    pub attrs: Vec<(&'static str, String)>,
    /// Text or code content. Empty for open/close tokens.
    pub content: String,
}

impl Token {
    /// Opening tag token.
    pub fn open(tag: &'static str, markup: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::Open,
            tag,
            markup: markup.into(),
            attrs: Vec::new(),
            content: String::new(),
        }
    }

    /// Closing tag token.
    pub fn close(tag: &'static str, markup: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::Close,
            tag,
            markup: markup.into(),
            attrs: Vec::new(),
            content: String::new(),
        }
    }

    /// Plain text token.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::Text,
            tag: "",
            markup: String::new(),
            attrs: Vec::new(),
            content: content.into(),
        }
    }

    /// Inline code token.
    pub fn code(content: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::Code,
            tag: "code",
            markup: markup.into(),
            attrs: Vec::new(),
            content: content.into(),
        }
    }

    /// Soft break token.
    pub fn softbreak() -> Self {
        Self {
            kind: TokenKind::Softbreak,
            tag: "",
            markup: String::new(),
            attrs: Vec::new(),
            content: String::new(),
        }
    }

    /// Attach an attribute, keeping insertion order.
    #[must_use]
    pub fn with_attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_open_close_record_markup() {
        let open = Token::open("sup", "^");
        assert_eq!(open.kind, TokenKind::Open);
        assert_eq!(open.tag, "sup");
        assert_eq!(open.markup, "^");

        let close = Token::close("sup", "^");
        assert_eq!(close.kind, TokenKind::Close);
        assert_eq!(close.markup, "^");
    }

    #[test]
    fn test_with_attr_keeps_order() {
        let token = Token::open("a", "")
            .with_attr("href", "https://example.test")
            .with_attr("title", "t");
        assert_eq!(token.attrs[0].0, "href");
        assert_eq!(token.attrs[1].0, "title");
    }
}
