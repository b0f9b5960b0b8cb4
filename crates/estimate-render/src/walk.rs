//! Markdown event walk
//!
//! A single pass over pulldown-cmark events. All render-time state lives in
//! [`RenderContext`], which is created per walk and consumed at the end, so
//! walks are independent of each other.

use crate::block::{plain_text, Block, ListMarker, Span, Table, TableRow, TextStyle};
use crate::notes::NotesState;
use estimate_normalizer::CompiledRules;
use once_cell::sync::Lazy;
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser as MdParser, Tag, TagEnd};
use regex::Regex;

static NUMBERED_TEXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d{1,3}[.)]\s+\S").unwrap());
static AMOUNT_CELL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\$\s?\d").unwrap());

/// Parser options used for every walk
fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Walk markdown into styled blocks
pub(crate) fn walk(markdown: &str, rules: &CompiledRules) -> Vec<Block> {
    let mut ctx = RenderContext::new(rules);
    for event in MdParser::new_ext(markdown, options()) {
        ctx.visit(event);
    }
    ctx.finish()
}

#[derive(Debug, Default)]
struct TableBuilder {
    header: Vec<String>,
    rows: Vec<Vec<Vec<Span>>>,
    row: Vec<Vec<Span>>,
}

#[derive(Debug)]
struct OpenItem {
    marker: ListMarker,
    flushed: bool,
}

/// Visitor state for one walk
struct RenderContext<'r> {
    rules: &'r CompiledRules,
    notes: NotesState,
    blocks: Vec<Block>,
    spans: Vec<Span>,
    strong: usize,
    emphasis: usize,
    heading: Option<u8>,
    lists: Vec<Option<u64>>,
    items: Vec<OpenItem>,
    table: Option<TableBuilder>,
    code: Option<(Option<String>, String)>,
}

impl<'r> RenderContext<'r> {
    fn new(rules: &'r CompiledRules) -> Self {
        Self {
            rules,
            notes: NotesState::default(),
            blocks: Vec::new(),
            spans: Vec::new(),
            strong: 0,
            emphasis: 0,
            heading: None,
            lists: Vec::new(),
            items: Vec::new(),
            table: None,
            code: None,
        }
    }

    fn visit(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if let Some((_, code)) = self.code.as_mut() {
                    code.push_str(&text);
                } else {
                    self.push_text(&text, false);
                }
            }
            Event::Code(text) => self.push_text(&text, true),
            Event::Html(text) | Event::InlineHtml(text) => self.push_text(&text, false),
            Event::SoftBreak => self.push_text(" ", false),
            Event::HardBreak => self.push_text("\n", false),
            Event::TaskListMarker(done) => self.push_text(if done { "[x] " } else { "[ ] " }, false),
            Event::Rule => self.blocks.push(Block::Rule),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.spans.clear();
                self.heading = Some(level as u8);
            }
            Tag::Paragraph => {
                if self.items.is_empty() {
                    self.spans.clear();
                } else if !self.spans.is_empty() {
                    self.push_text(" ", false);
                }
            }
            Tag::List(start) => {
                self.flush_item_head();
                self.lists.push(start);
            }
            Tag::Item => {
                self.spans.clear();
                let marker = match self.lists.last_mut() {
                    Some(Some(next)) => {
                        let marker = ListMarker::Number(*next);
                        *next += 1;
                        marker
                    }
                    _ => ListMarker::Bullet,
                };
                self.items.push(OpenItem {
                    marker,
                    flushed: false,
                });
            }
            Tag::Table(_) => self.table = Some(TableBuilder::default()),
            Tag::TableCell => self.spans.clear(),
            Tag::CodeBlock(kind) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) if !info.trim().is_empty() => {
                        info.split_whitespace().next().map(str::to_string)
                    }
                    _ => None,
                };
                self.code = Some((language, String::new()));
            }
            Tag::HtmlBlock => self.spans.clear(),
            Tag::Strong => self.strong += 1,
            Tag::Emphasis => self.emphasis += 1,
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                let level = self.heading.take().unwrap_or(1);
                let text = plain_text(&self.take_spans()).trim().to_string();
                self.notes = self.notes.on_heading(&text, self.rules);
                self.blocks.push(Block::Heading {
                    level,
                    text,
                    style: self.notes.heading_style(),
                });
            }
            TagEnd::Paragraph if self.items.is_empty() && self.table.is_none() => {
                let spans = self.take_spans();
                if !spans.is_empty() {
                    let style = self.paragraph_style(&spans);
                    self.blocks.push(Block::Paragraph { spans, style });
                }
            }
            TagEnd::HtmlBlock => {
                let spans = self.take_spans();
                if !plain_text(&spans).trim().is_empty() {
                    self.blocks.push(Block::Paragraph {
                        spans,
                        style: TextStyle::Body,
                    });
                }
            }
            TagEnd::List(_) => {
                self.lists.pop();
            }
            TagEnd::Item => {
                if let Some(item) = self.items.pop() {
                    let spans = self.take_spans();
                    if !item.flushed || !spans.is_empty() {
                        self.push_item(item.marker, spans);
                    }
                }
            }
            TagEnd::TableCell => {
                let cell = self.take_spans();
                if let Some(table) = self.table.as_mut() {
                    table.row.push(cell);
                }
            }
            TagEnd::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.header = table
                        .row
                        .drain(..)
                        .map(|cell| plain_text(&cell).trim().to_string())
                        .collect();
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    let row = std::mem::take(&mut table.row);
                    table.rows.push(row);
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    self.blocks.push(Block::Table(build_table(table)));
                }
            }
            TagEnd::CodeBlock => {
                if let Some((language, code)) = self.code.take() {
                    self.blocks.push(Block::CodeBlock { language, code });
                }
            }
            TagEnd::Strong => self.strong = self.strong.saturating_sub(1),
            TagEnd::Emphasis => self.emphasis = self.emphasis.saturating_sub(1),
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Block> {
        let spans = self.take_spans();
        if !plain_text(&spans).trim().is_empty() {
            let style = self.paragraph_style(&spans);
            self.blocks.push(Block::Paragraph { spans, style });
        }
        self.blocks
    }

    fn push_text(&mut self, text: &str, code: bool) {
        let strong = self.strong > 0;
        let emphasis = self.emphasis > 0;
        if let Some(last) = self.spans.last_mut() {
            if last.strong == strong && last.emphasis == emphasis && last.code == code {
                last.text.push_str(text);
                return;
            }
        }
        self.spans.push(Span {
            text: text.to_string(),
            strong,
            emphasis,
            code,
        });
    }

    fn take_spans(&mut self) -> Vec<Span> {
        std::mem::take(&mut self.spans)
    }

    /// Emit the text an item holds before its nested list
    fn flush_item_head(&mut self) {
        let Some(item) = self.items.last_mut() else {
            return;
        };
        if self.spans.is_empty() {
            return;
        }
        item.flushed = true;
        let marker = item.marker;
        let spans = self.take_spans();
        self.push_item(marker, spans);
    }

    fn push_item(&mut self, marker: ListMarker, spans: Vec<Span>) {
        let style = match marker {
            ListMarker::Bullet => TextStyle::Body,
            ListMarker::Number(_) => self.notes.numbered_style(),
        };
        self.blocks.push(Block::ListItem {
            marker,
            depth: self.lists.len().saturating_sub(1),
            spans: trim_spans(spans),
            style,
        });
    }

    fn paragraph_style(&self, spans: &[Span]) -> TextStyle {
        let text = plain_text(spans);
        let all_strong = spans
            .iter()
            .filter(|s| !s.text.trim().is_empty())
            .all(|s| s.strong);
        if all_strong && self.rules.mentions_total(&text) {
            TextStyle::TotalMarker
        } else if NUMBERED_TEXT_RE.is_match(&text) {
            self.notes.numbered_style()
        } else {
            TextStyle::Body
        }
    }
}

fn trim_spans(mut spans: Vec<Span>) -> Vec<Span> {
    if let Some(first) = spans.first_mut() {
        first.text = first.text.trim_start().to_string();
    }
    if let Some(last) = spans.last_mut() {
        last.text = last.text.trim_end().to_string();
    }
    spans.retain(|s| !s.text.is_empty());
    spans
}

fn build_table(builder: TableBuilder) -> Table {
    let columns = builder
        .rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(builder.header.len()))
        .max()
        .unwrap_or(0);

    let amount_columns = (0..columns)
        .map(|col| {
            let mut cells = builder
                .rows
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| plain_text(cell).trim().to_string())
                .filter(|text| !text.is_empty())
                .peekable();
            cells.peek().is_some() && cells.all(|text| AMOUNT_CELL_RE.is_match(&text))
        })
        .collect();

    let rows = builder
        .rows
        .into_iter()
        .map(|cells| {
            let total = cells.first().is_some_and(|first| {
                let text = plain_text(first);
                !text.trim().is_empty()
                    && first.iter().all(|s| s.strong || s.text.trim().is_empty())
                    && text.to_lowercase().contains("total")
            });
            TableRow { cells, total }
        })
        .collect();

    Table {
        header: builder.header,
        rows,
        amount_columns,
    }
}
