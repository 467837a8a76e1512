//! Markdown to HTML fragment rendering with Canvas inline decorators.
//!
//! Block-level structure (paragraphs, headings, lists, tables, code
//! blocks) is parsed by `pulldown-cmark`; the raw source of each inline
//! run is handed to the [`canvas_inline`] pipeline, so decorator shortcuts
//! like `^sup^`, `==mark==` and `::kbd::` work inside full documents and
//! compose with native emphasis, strong, strikethrough, links, and inline
//! code.
//!
//! # Example
//!
//! ```
//! use canvas_renderer::FragmentRenderer;
//!
//! let renderer = FragmentRenderer::new();
//! let html = renderer.render("press ::Ctrl:: to **continue**");
//! assert_eq!(html, "<p>press <kbd>Ctrl</kbd> to <strong>continue</strong></p>");
//! ```

mod renderer;

pub use renderer::FragmentRenderer;
