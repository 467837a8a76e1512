//! Event-walking markdown renderer with inline decorator support.

use std::fmt::Write;
use std::ops::Range;

use canvas_inline::{InlineEngine, escape_html};
use pulldown_cmark::{
    Alignment, CodeBlockKind, Event, HeadingLevel, LinkType, Options, Parser, Tag, TagEnd,
};
use tracing::debug;

/// Renders markdown text to an HTML fragment.
///
/// Block structure comes from `pulldown-cmark`; all inline content is
/// re-scanned by a full [`InlineEngine`]. Text runs are collected from the
/// raw source ranges of the events — including the raw source of inline
/// emphasis, strong, strikethrough, links, and images — and flushed through
/// the engine only at block boundaries. Collecting raw slices keeps
/// backslash escapes intact for the engine and lets a decorator span
/// survive soft line breaks, inline code, and nested inline constructs.
pub struct FragmentRenderer {
    inline: InlineEngine,
    gfm: bool,
}

impl FragmentRenderer {
    /// Create a renderer with GFM enabled by default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inline: InlineEngine::new(),
            gfm: true,
        }
    }

    /// Enable or disable GitHub Flavored Markdown features
    /// (tables, `~~strikethrough~~`, task lists).
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render markdown text to an HTML fragment.
    pub fn render(&self, markdown: &str) -> String {
        debug!(len = markdown.len(), "rendering markdown fragment");
        let parser = Parser::new_ext(markdown, self.parser_options()).into_offset_iter();
        let mut emitter = Emitter::new(markdown, &self.inline);
        for (event, range) in parser {
            emitter.process(event, range);
        }
        emitter.finish()
    }
}

impl Default for FragmentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-render output state.
struct Emitter<'a> {
    src: &'a str,
    inline: &'a InlineEngine,
    out: String,
    /// Raw source of the inline text run being collected.
    text: String,
    /// Language and buffer of the code block being collected.
    code: Option<(Option<String>, String)>,
    /// Alt-text buffer while inside an image.
    image_alt: Option<String>,
    pending_image: Option<(String, String)>,
    /// Unmatched `Start` events of a raw-buffered inline construct; while
    /// non-zero, events are covered by the buffered source slice.
    raw_depth: usize,
    table_alignments: Vec<Alignment>,
    table_cell: usize,
    table_in_head: bool,
}

impl<'a> Emitter<'a> {
    fn new(src: &'a str, inline: &'a InlineEngine) -> Self {
        Self {
            src,
            inline,
            out: String::with_capacity(src.len() + src.len() / 2),
            text: String::new(),
            code: None,
            image_alt: None,
            pending_image: None,
            raw_depth: 0,
            table_alignments: Vec::new(),
            table_cell: 0,
            table_in_head: false,
        }
    }

    /// Run the collected raw text through the inline engine.
    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let raw = std::mem::take(&mut self.text);
            self.out.push_str(&self.inline.render(&raw));
        }
    }

    /// Buffer the raw source of a pulldown-native inline construct; its
    /// nested events are skipped and the inline engine re-parses the whole
    /// slice at the next flush.
    fn buffer_raw(&mut self, range: Range<usize>) {
        self.text.push_str(&self.src[range.start..range.end]);
        self.raw_depth = 1;
    }

    fn process(&mut self, event: Event<'_>, range: Range<usize>) {
        // Skip everything nested in a raw-buffered construct until its own
        // end event; the buffered source slice already covers it.
        if self.raw_depth > 0 {
            match event {
                Event::Start(_) => self.raw_depth += 1,
                Event::End(_) => self.raw_depth -= 1,
                _ => {}
            }
            return;
        }
        match event {
            Event::Text(text) => {
                if let Some((_, buffer)) = &mut self.code {
                    buffer.push_str(&text);
                } else if let Some(alt) = &mut self.image_alt {
                    alt.push_str(&text);
                } else {
                    let raw = &self.src[range];
                    if raw == &*text {
                        self.text.push_str(raw);
                    } else {
                        // The block parser decoded an entity or escape.
                        // Keep the decoded form, neutralized so the inline
                        // scan treats it literally.
                        push_literal(&mut self.text, &text);
                    }
                }
            }
            Event::Code(code) => {
                // Raw slice including the backticks: the inline engine
                // re-parses the span, so decorators around it still match.
                if let Some(alt) = &mut self.image_alt {
                    alt.push_str(&code);
                } else {
                    self.text.push_str(&self.src[range]);
                }
            }
            Event::SoftBreak => {
                if let Some(alt) = &mut self.image_alt {
                    alt.push(' ');
                } else {
                    self.text.push('\n');
                }
            }
            Event::HardBreak => {
                self.flush_text();
                self.out.push_str("<br>");
            }
            Event::Start(tag) => match tag {
                Tag::Emphasis | Tag::Strong | Tag::Strikethrough
                    if self.image_alt.is_none() =>
                {
                    self.buffer_raw(range);
                }
                Tag::Link {
                    link_type: LinkType::Inline,
                    ..
                }
                | Tag::Image {
                    link_type: LinkType::Inline,
                    ..
                } if self.image_alt.is_none() => {
                    self.buffer_raw(range);
                }
                tag => {
                    self.flush_text();
                    self.start_tag(tag);
                }
            },
            Event::End(tag) => {
                self.flush_text();
                self.end_tag(tag);
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                self.flush_text();
                self.out.push_str(&html);
            }
            Event::Rule => {
                self.flush_text();
                self.out.push_str("<hr>");
            }
            Event::TaskListMarker(checked) => {
                if checked {
                    self.out.push_str(r#"<input type="checkbox" checked disabled> "#);
                } else {
                    self.out.push_str(r#"<input type="checkbox" disabled> "#);
                }
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    #[allow(clippy::too_many_lines)]
    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.out.push_str("<p>"),
            Tag::Heading { level, .. } => {
                write!(self.out, "<h{}>", heading_level_to_num(level)).unwrap();
            }
            Tag::BlockQuote(_) => self.out.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(ref info) if !info.is_empty() => info
                        .split_whitespace()
                        .next()
                        .map(std::borrow::ToOwned::to_owned),
                    _ => None,
                };
                self.code = Some((lang, String::new()));
            }
            Tag::List(start) => match start {
                Some(1) => self.out.push_str("<ol>"),
                Some(n) => write!(self.out, r#"<ol start="{n}">"#).unwrap(),
                None => self.out.push_str("<ul>"),
            },
            Tag::Item => self.out.push_str("<li>"),
            Tag::Table(alignments) => {
                self.table_alignments = alignments.clone();
                self.out.push_str("<table>");
            }
            Tag::TableHead => {
                self.table_in_head = true;
                self.table_cell = 0;
                self.out.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table_cell = 0;
                self.out.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = match self.table_alignments.get(self.table_cell) {
                    Some(Alignment::Left) => r#" style="text-align:left""#,
                    Some(Alignment::Center) => r#" style="text-align:center""#,
                    Some(Alignment::Right) => r#" style="text-align:right""#,
                    Some(Alignment::None) | None => "",
                };
                let cell = if self.table_in_head { "th" } else { "td" };
                write!(self.out, "<{cell}{align}>").unwrap();
            }
            Tag::Emphasis => self.out.push_str("<em>"),
            Tag::Strong => self.out.push_str("<strong>"),
            Tag::Strikethrough => self.out.push_str("<s>"),
            Tag::Link { dest_url, .. } => {
                write!(self.out, r#"<a href="{}">"#, escape_html(&dest_url)).unwrap();
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image_alt = Some(String::new());
                self.pending_image = Some((dest_url.to_string(), title.to_string()));
            }
            Tag::Superscript => self.out.push_str("<sup>"),
            Tag::Subscript => self.out.push_str("<sub>"),
            Tag::DefinitionList => self.out.push_str("<dl>"),
            Tag::DefinitionListTitle => self.out.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.out.push_str("<dd>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.out.push_str("</p>"),
            TagEnd::Heading(level) => {
                write!(self.out, "</h{}>", heading_level_to_num(level)).unwrap();
            }
            TagEnd::BlockQuote(_) => self.out.push_str("</blockquote>"),
            TagEnd::CodeBlock => {
                if let Some((lang, content)) = self.code.take() {
                    if let Some(lang) = lang {
                        write!(
                            self.out,
                            r#"<pre><code class="language-{}">{}</code></pre>"#,
                            escape_html(&lang),
                            escape_html(&content)
                        )
                        .unwrap();
                    } else {
                        write!(self.out, "<pre><code>{}</code></pre>", escape_html(&content))
                            .unwrap();
                    }
                }
            }
            TagEnd::List(ordered) => {
                self.out.push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.out.push_str("</li>"),
            TagEnd::Table => self.out.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.table_in_head = false;
                self.out.push_str("</tr></thead><tbody>");
            }
            TagEnd::TableRow => self.out.push_str("</tr>"),
            TagEnd::TableCell => {
                self.out
                    .push_str(if self.table_in_head { "</th>" } else { "</td>" });
                self.table_cell += 1;
            }
            TagEnd::Emphasis => self.out.push_str("</em>"),
            TagEnd::Strong => self.out.push_str("</strong>"),
            TagEnd::Strikethrough => self.out.push_str("</s>"),
            TagEnd::Link => self.out.push_str("</a>"),
            TagEnd::Image => {
                let alt = self.image_alt.take().unwrap_or_default();
                if let Some((src, title)) = self.pending_image.take() {
                    let title_attr = if title.is_empty() {
                        String::new()
                    } else {
                        format!(r#" title="{}""#, escape_html(&title))
                    };
                    write!(
                        self.out,
                        r#"<img src="{}"{title_attr} alt="{}">"#,
                        escape_html(&src),
                        escape_html(&alt)
                    )
                    .unwrap();
                }
            }
            TagEnd::Superscript => self.out.push_str("</sup>"),
            TagEnd::Subscript => self.out.push_str("</sub>"),
            TagEnd::DefinitionList => self.out.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.out.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.out.push_str("</dd>"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
        }
    }

    fn finish(mut self) -> String {
        self.flush_text();
        self.out
    }
}

/// Append decoded text with its ASCII punctuation backslash-escaped, so the
/// inline engine's escape rule reproduces it verbatim.
fn push_literal(out: &mut String, text: &str) {
    for c in text.chars() {
        if c.is_ascii_punctuation() {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
