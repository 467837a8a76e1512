//! Named, ordered chain of inline rules.
//!
//! Rules are tried in chain order at every scan position. A rule returns
//! `true` when it matched and advanced the cursor, `false` to let the next
//! rule try. Registration is by unique name with optional anchoring before
//! an existing rule, which is how extension rules end up ahead of the
//! default text rule.

use crate::engine::InlineEngine;
use crate::state::InlineState;

/// A single inline scanning rule.
///
/// `silent` is the lookahead validation mode: a rule that matches in silent
/// mode must advance `state.pos` past its construct without emitting tokens.
/// Rules that cannot validate without committing simply return `false` when
/// silent.
pub trait InlineRule: Send + Sync {
    fn run(&self, engine: &InlineEngine, state: &mut InlineState<'_>, silent: bool) -> bool;
}

struct Entry {
    name: &'static str,
    rule: Box<dyn InlineRule>,
}

/// Ordered rule chain.
#[derive(Default)]
pub(crate) struct Ruler {
    entries: Vec<Entry>,
}

impl Ruler {
    /// Append a rule at the end of the chain.
    pub fn push(&mut self, name: &'static str, rule: Box<dyn InlineRule>) {
        debug_assert!(!self.contains(name), "duplicate rule name {name}");
        self.entries.push(Entry { name, rule });
    }

    /// Insert a rule immediately before `anchor`. Appends if the anchor is
    /// not present.
    pub fn insert_before(&mut self, anchor: &str, name: &'static str, rule: Box<dyn InlineRule>) {
        debug_assert!(!self.contains(name), "duplicate rule name {name}");
        let index = self
            .entries
            .iter()
            .position(|e| e.name == anchor)
            .unwrap_or(self.entries.len());
        self.entries.insert(index, Entry { name, rule });
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn InlineRule> {
        self.entries.iter().map(|e| &*e.rule)
    }

    #[cfg(test)]
    pub(crate) fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name).collect()
    }
}
