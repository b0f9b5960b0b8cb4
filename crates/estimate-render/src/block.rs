//! Styled block tree
//!
//! The renderer flattens a markdown document into a list of blocks, each
//! carrying the presentation style chosen for it during the walk.

use serde::Serialize;

/// Run of inline text with its emphasis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Text content
    pub text: String,
    /// Bold
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub strong: bool,
    /// Italic
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub emphasis: bool,
    /// Inline code
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub code: bool,
}

impl Span {
    /// Unstyled text
    #[inline]
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Bold text
    #[inline]
    #[must_use]
    pub fn strong(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            strong: true,
            ..Self::default()
        }
    }
}

/// Concatenated text of a span run
#[must_use]
pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

/// Heading presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingStyle {
    /// Accent-coloured section header
    Section,
    /// Plain heading with no accent
    Plain,
}

/// Paragraph and list-item presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    /// Ordinary body text
    Body,
    /// Numbered item drawn with a coloured number badge
    Badge,
    /// Numbered item drawn as plain text, number kept
    PlainNumbered,
    /// Standalone grand-total line
    TotalMarker,
}

/// List item marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum ListMarker {
    /// Unordered bullet
    Bullet,
    /// Ordered item number
    Number(u64),
}

/// One table body row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    /// Cells, each a span run
    pub cells: Vec<Vec<Span>>,
    /// Grand-total row
    pub total: bool,
}

/// Table block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    /// Header cell text
    pub header: Vec<String>,
    /// Body rows
    pub rows: Vec<TableRow>,
    /// Per-column flag for currency columns
    pub amount_columns: Vec<bool>,
}

/// Rendered block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Heading
    Heading {
        /// Level 1 to 6
        level: u8,
        /// Heading text
        text: String,
        /// Presentation
        style: HeadingStyle,
    },
    /// Paragraph
    Paragraph {
        /// Inline content
        spans: Vec<Span>,
        /// Presentation
        style: TextStyle,
    },
    /// List item
    ListItem {
        /// Bullet or number
        marker: ListMarker,
        /// Nesting depth, 0 for top level
        depth: usize,
        /// Inline content
        spans: Vec<Span>,
        /// Presentation
        style: TextStyle,
    },
    /// Table
    Table(Table),
    /// Fenced or indented code
    CodeBlock {
        /// Info string language
        language: Option<String>,
        /// Code text
        code: String,
    },
    /// Thematic break
    Rule,
}

impl Block {
    /// Presentation style of a text block
    #[must_use]
    pub fn text_style(&self) -> Option<TextStyle> {
        match self {
            Self::Paragraph { style, .. } | Self::ListItem { style, .. } => Some(*style),
            _ => None,
        }
    }

    /// Plain text of headings, paragraphs and list items
    #[must_use]
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Heading { text, .. } => Some(text.clone()),
            Self::Paragraph { spans, .. } | Self::ListItem { spans, .. } => Some(plain_text(spans)),
            _ => None,
        }
    }
}
