//! Inline markdown decorator engine for Canvas rich-text content.
//!
//! Canvas documents mark up inline spans with symmetric delimiter pairs:
//! native markdown emphasis (`**bold**`, `*italic*`, `` `code` ``,
//! `~~strike~~`) plus decorator extensions such as `^sup^`, `~sub~`,
//! `==mark==`, `++ins++` and `::kbd::`. This crate provides:
//!
//! - the [`DECORATORS`] delimiter table mapping every shortcut to its tag
//!   and output-capability setting key;
//! - an inline parsing pipeline ([`InlineEngine`]) with named, ordered
//!   rules and longest-shortcut-first extension registration;
//! - token-stream output ([`Token`]) and HTML fragment serialization.
//!
//! # Example
//!
//! ```
//! use canvas_inline::InlineEngine;
//!
//! let engine = InlineEngine::new();
//! assert_eq!(engine.render("press ::Ctrl:: to ==continue=="),
//!     "press <kbd>Ctrl</kbd> to <mark>continue</mark>");
//! ```
//!
//! The engine is immutable once built and safe to share across threads;
//! scan state lives only for the duration of one parse call.

mod decorator;
mod engine;
mod error;
mod html;
mod ruler;
mod rules;
mod shortcut;
mod state;
mod token;

pub use decorator::{DECORATORS, Decorator, extension_rules, validate};
pub use engine::InlineEngine;
pub use error::TableError;
pub use html::{escape_html, render_tokens};
pub use ruler::InlineRule;
pub use state::InlineState;
pub use token::{Token, TokenKind};
