//! Programmatic document construction.
//!
//! Builders accumulate already-normalized nodes and finish by rendering the
//! canonical Markdown and parsing it back, so a hand-built document carries
//! real source spans and is structurally indistinguishable from a parsed
//! one. Equality is canonical either way.

use crate::ast::{BlockNode, InlineNode, ListItem, ListStyle};
use crate::canonical;
use crate::document::Document;
use crate::parsing::ParseError;
use crate::span::Span;

/// Spans of builder-made nodes before [`DocumentBuilder::build`] re-parses.
fn placeholder() -> Span {
    Span::new(0, 0)
}

/// Accumulates a sequence of inline nodes.
#[derive(Debug, Default)]
pub struct InlineSeq {
    nodes: Vec<InlineNode>,
}

impl InlineSeq {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, literal: impl Into<String>) -> Self {
        self.nodes.push(InlineNode::Text {
            literal: literal.into(),
            span: placeholder(),
        });
        self
    }

    #[must_use]
    pub fn code(mut self, literal: impl Into<String>) -> Self {
        self.nodes.push(InlineNode::Code {
            literal: literal.into(),
            span: placeholder(),
        });
        self
    }

    #[must_use]
    pub fn html(mut self, literal: impl Into<String>) -> Self {
        self.nodes.push(InlineNode::Html {
            literal: literal.into(),
            span: placeholder(),
        });
        self
    }

    #[must_use]
    pub fn soft_break(mut self) -> Self {
        self.nodes.push(InlineNode::SoftBreak {
            span: placeholder(),
        });
        self
    }

    #[must_use]
    pub fn line_break(mut self) -> Self {
        self.nodes.push(InlineNode::LineBreak {
            span: placeholder(),
        });
        self
    }

    #[must_use]
    pub fn emphasis(mut self, f: impl FnOnce(InlineSeq) -> InlineSeq) -> Self {
        self.nodes.push(InlineNode::Emphasis {
            children: f(InlineSeq::new()).nodes,
            span: placeholder(),
        });
        self
    }

    #[must_use]
    pub fn strong(mut self, f: impl FnOnce(InlineSeq) -> InlineSeq) -> Self {
        self.nodes.push(InlineNode::Strong {
            children: f(InlineSeq::new()).nodes,
            span: placeholder(),
        });
        self
    }

    #[must_use]
    pub fn strikethrough(mut self, f: impl FnOnce(InlineSeq) -> InlineSeq) -> Self {
        self.nodes.push(InlineNode::Strikethrough {
            children: f(InlineSeq::new()).nodes,
            span: placeholder(),
        });
        self
    }

    #[must_use]
    pub fn link(mut self, url: impl Into<String>, f: impl FnOnce(InlineSeq) -> InlineSeq) -> Self {
        self.nodes.push(InlineNode::Link {
            children: f(InlineSeq::new()).nodes,
            url: url.into(),
            span: placeholder(),
        });
        self
    }

    #[must_use]
    pub fn image(mut self, url: impl Into<String>, alt: impl Into<String>) -> Self {
        self.nodes.push(InlineNode::Image {
            children: vec![InlineNode::Text {
                literal: alt.into(),
                span: placeholder(),
            }],
            url: url.into(),
            span: placeholder(),
        });
        self
    }
}

/// Accumulates list items.
#[derive(Debug, Default)]
pub struct ListBuilder {
    items: Vec<ListItem>,
}

impl ListBuilder {
    #[must_use]
    pub fn item(mut self, f: impl FnOnce(DocumentBuilder) -> DocumentBuilder) -> Self {
        self.items.push(ListItem {
            blocks: f(DocumentBuilder::new()).blocks,
            span: placeholder(),
        });
        self
    }
}

/// Accumulates top-level (or nested) blocks and finishes to a [`Document`].
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    blocks: Vec<BlockNode>,
}

impl DocumentBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn paragraph(mut self, f: impl FnOnce(InlineSeq) -> InlineSeq) -> Self {
        self.blocks.push(BlockNode::Paragraph {
            inlines: f(InlineSeq::new()).nodes,
            span: placeholder(),
        });
        self
    }

    #[must_use]
    pub fn heading(mut self, level: u8, f: impl FnOnce(InlineSeq) -> InlineSeq) -> Self {
        self.blocks.push(BlockNode::Heading {
            inlines: f(InlineSeq::new()).nodes,
            level: level.clamp(1, 6),
            span: placeholder(),
        });
        self
    }

    #[must_use]
    pub fn block_quote(mut self, f: impl FnOnce(DocumentBuilder) -> DocumentBuilder) -> Self {
        self.blocks.push(BlockNode::BlockQuote {
            blocks: f(DocumentBuilder::new()).blocks,
            span: placeholder(),
        });
        self
    }

    #[must_use]
    pub fn bullet_list(mut self, f: impl FnOnce(ListBuilder) -> ListBuilder) -> Self {
        self.blocks.push(BlockNode::List {
            items: f(ListBuilder::default()).items,
            style: ListStyle::Bullet,
            span: placeholder(),
        });
        self
    }

    #[must_use]
    pub fn ordered_list(mut self, f: impl FnOnce(ListBuilder) -> ListBuilder) -> Self {
        self.blocks.push(BlockNode::List {
            items: f(ListBuilder::default()).items,
            style: ListStyle::Ordered,
            span: placeholder(),
        });
        self
    }

    #[must_use]
    pub fn code_block(mut self, language: Option<&str>, literal: impl Into<String>) -> Self {
        self.blocks.push(BlockNode::CodeBlock {
            literal: literal.into(),
            language: language.map(str::to_string),
            span: placeholder(),
        });
        self
    }

    #[must_use]
    pub fn html_block(mut self, literal: impl Into<String>) -> Self {
        self.blocks.push(BlockNode::HtmlBlock {
            literal: literal.into(),
            span: placeholder(),
        });
        self
    }

    #[must_use]
    pub fn thematic_break(mut self) -> Self {
        self.blocks.push(BlockNode::ThematicBreak {
            span: placeholder(),
        });
        self
    }

    /// Renders the accumulated blocks canonically and parses the result.
    ///
    /// The round trip gives every node a real span, so built and parsed
    /// content go through one normalization path.
    pub fn build(self) -> Result<Document, ParseError> {
        Document::parse(&canonical::render_blocks(&self.blocks))
    }
}
