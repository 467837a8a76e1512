//! The delimiter table: every inline shortcut the engine knows about.
//!
//! Each entry maps a symmetric delimiter string to the markup tag it
//! produces and the output-capability setting key downstream schema
//! filtering reads. Entries with `is_extension = false` are understood by
//! the base markdown engine natively; they are listed here only so setting
//! keys can be looked up uniformly, and must never be registered as
//! extension rules (registering them would double-handle the shortcut).

use crate::error::TableError;

/// One inline markup rule, defined once at startup and immutable after.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Decorator {
    /// Literal delimiter opening and closing the span (open == close).
    pub shortcut: &'static str,
    /// Markup tag the rule produces.
    pub tag: &'static str,
    /// Whether this rule must be registered into the inline pipeline.
    /// `false` means the base engine already handles the shortcut.
    pub is_extension: bool,
    /// Capability key consumed by destination-schema filtering. Advisory
    /// only; the tokenizer never reads it.
    pub setting_key: &'static str,
}

/// The full decorator catalogue, in declaration order.
///
/// The double-backtick entry is a deliberate precedence workaround, not a
/// duplicate: registering it as an extension lets writers open a code span
/// with two backticks before the base engine's single-backtick rule can
/// claim the first one.
pub static DECORATORS: [Decorator; 10] = [
    Decorator {
        shortcut: "**",
        tag: "strong",
        is_extension: false,
        setting_key: "decorator.bold",
    },
    Decorator {
        shortcut: "*",
        tag: "em",
        is_extension: false,
        setting_key: "decorator.italic",
    },
    Decorator {
        shortcut: "`",
        tag: "code",
        is_extension: false,
        setting_key: "decorator.code",
    },
    Decorator {
        shortcut: "~~",
        tag: "s",
        is_extension: false,
        setting_key: "decorator.strikethrough",
    },
    Decorator {
        shortcut: "``",
        tag: "code",
        is_extension: true,
        setting_key: "decorator.code",
    },
    Decorator {
        shortcut: "==",
        tag: "mark",
        is_extension: true,
        setting_key: "decorator.highlight",
    },
    Decorator {
        shortcut: "++",
        tag: "ins",
        is_extension: true,
        setting_key: "decorator.underline",
    },
    Decorator {
        shortcut: "::",
        tag: "kbd",
        is_extension: true,
        setting_key: "decorator.keyboard",
    },
    Decorator {
        shortcut: "^",
        tag: "sup",
        is_extension: true,
        setting_key: "decorator.superscript",
    },
    Decorator {
        shortcut: "~",
        tag: "sub",
        is_extension: true,
        setting_key: "decorator.subscript",
    },
];

impl Decorator {
    /// Look up the table entry for a literal shortcut.
    pub fn for_shortcut(shortcut: &str) -> Option<&'static Decorator> {
        DECORATORS.iter().find(|d| d.shortcut == shortcut)
    }

    /// Look up the first table entry producing `tag`.
    pub fn for_tag(tag: &str) -> Option<&'static Decorator> {
        DECORATORS.iter().find(|d| d.tag == tag)
    }
}

/// Extension rules in registration order: longest shortcut first, with the
/// table's declaration order as the tie-break for equal lengths.
///
/// Longest-first is mandatory — a shorter shortcut sharing a prefix with a
/// longer one would otherwise steal its opening characters. The stable sort
/// makes the order deterministic across initializations.
pub fn extension_rules(table: &'static [Decorator]) -> Vec<&'static Decorator> {
    let mut rules: Vec<_> = table.iter().filter(|d| d.is_extension).collect();
    rules.sort_by_key(|d| std::cmp::Reverse(d.shortcut.len()));
    rules
}

/// Validate a decorator table before building an engine from it.
///
/// Rejects empty and duplicate shortcuts. Prefix shadowing between active
/// rules needs no check here: registration always sorts longest-first, so a
/// shorter shortcut can never run ahead of a longer one.
pub fn validate(table: &[Decorator]) -> Result<(), TableError> {
    for (i, decorator) in table.iter().enumerate() {
        if decorator.shortcut.is_empty() {
            return Err(TableError::EmptyShortcut(decorator.tag.to_owned()));
        }
        if table[..i].iter().any(|d| d.shortcut == decorator.shortcut) {
            return Err(TableError::DuplicateShortcut(decorator.shortcut.to_owned()));
        }
    }
    Ok(())
}
