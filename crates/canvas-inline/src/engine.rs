//! Inline engine: rule-chain assembly, tokenization loop, rendering.

use crate::decorator::{self, DECORATORS, Decorator};
use crate::error::TableError;
use crate::html;
use crate::ruler::Ruler;
use crate::rules::{
    BacktickRule, EmphasisRule, EscapeRule, ImageRule, LinkRule, NewlineRule, TextRule,
};
use crate::shortcut::ShortcutRule;
use crate::state::InlineState;
use crate::token::Token;

/// Inline markdown engine with registered decorator extensions.
///
/// The engine is built once and is immutable afterwards; it holds no
/// per-parse state and can be shared freely across threads. Each call to
/// [`parse`](Self::parse) or [`render`](Self::render) creates a fresh
/// [`InlineState`] and discards it after serialization.
pub struct InlineEngine {
    ruler: Ruler,
}

impl InlineEngine {
    /// Full pipeline: native rules plus the built-in decorator table.
    pub fn new() -> Self {
        // The built-in table is validated by its own tests, so building
        // from it cannot fail.
        let mut engine = Self::base();
        engine.register(&decorator::extension_rules(&DECORATORS));
        engine
    }

    /// Full pipeline over a custom decorator table.
    pub fn with_decorators(table: &'static [Decorator]) -> Result<Self, TableError> {
        decorator::validate(table)?;
        let mut engine = Self::base();
        engine.register(&decorator::extension_rules(table));
        Ok(engine)
    }

    /// Native rule chain. The text rule sits at the head so extension
    /// registration can anchor in front of it.
    fn base() -> Self {
        let mut ruler = Ruler::default();
        ruler.push("text", Box::new(TextRule));
        ruler.push("newline", Box::new(NewlineRule));
        ruler.push("escape", Box::new(EscapeRule));
        ruler.push("backtick", Box::new(BacktickRule));
        ruler.push("emphasis", Box::new(EmphasisRule));
        ruler.push("link", Box::new(LinkRule));
        ruler.push("image", Box::new(ImageRule));
        Self { ruler }
    }

    /// Register extension rules ahead of the default text rule, preserving
    /// the given order. Callers pass the table pre-sorted longest-first;
    /// anchoring each rule before `text` keeps that order in the chain.
    fn register(&mut self, rules: &[&'static Decorator]) {
        for decorator in rules {
            self.ruler.insert_before(
                "text",
                decorator.tag,
                Box::new(ShortcutRule::new(decorator)),
            );
        }
    }

    /// Tokenize an inline source string.
    pub fn parse(&self, src: &str) -> Vec<Token> {
        let mut state = InlineState::new(src);
        self.tokenize(&mut state);
        state.into_tokens()
    }

    /// Render an inline source string to an HTML fragment.
    pub fn render(&self, src: &str) -> String {
        html::render_tokens(&self.parse(src))
    }

    /// Run the rule chain over the state's current range.
    ///
    /// At each position the first matching rule wins; when none matches,
    /// one character is consumed as literal text so the loop always makes
    /// progress.
    pub(crate) fn tokenize(&self, state: &mut InlineState<'_>) {
        while state.pos < state.pos_max {
            let matched = self.ruler.rules().any(|rule| rule.run(self, state, false));
            if !matched {
                let Some(c) = state.next_char() else { break };
                state.push_pending_char(c);
                state.pos += c.len_utf8();
            }
        }
        state.flush_pending();
    }

    /// Skip one inline construct atomically.
    ///
    /// Runs the chain in silent mode; a rule that validates advances the
    /// cursor past its whole construct. When nothing validates, one
    /// character is skipped. Closing-marker scans step with this instead of
    /// per-character so markers inside nested constructs are never taken.
    pub(crate) fn skip_token(&self, state: &mut InlineState<'_>) {
        let matched = self.ruler.rules().any(|rule| rule.run(self, state, true));
        if !matched {
            match state.next_char() {
                Some(c) => state.pos += c.len_utf8(),
                None => state.pos = state.pos_max,
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn rule_names(&self) -> Vec<&'static str> {
        self.ruler.names()
    }
}

impl Default for InlineEngine {
    fn default() -> Self {
        Self::new()
    }
}
