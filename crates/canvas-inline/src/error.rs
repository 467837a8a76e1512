//! Error types for delimiter-table validation.
//!
//! Parsing itself has no error type: a failed match is a boolean non-match
//! and malformed input degrades to literal text. The only guarded failure
//! is a misconfigured table, caught at construction time.

use thiserror::Error;

/// Delimiter-table configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// Two rules declare the same shortcut.
    #[error("duplicate shortcut `{0}` in delimiter table")]
    DuplicateShortcut(String),

    /// A rule declares an empty shortcut.
    #[error("empty shortcut for tag `{0}`")]
    EmptyShortcut(String),
}
