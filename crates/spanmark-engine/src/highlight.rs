//! Rendered-text to source coordinate mapping.
//!
//! Source spans and rendered offsets are different address spaces: the
//! rendered text is the delimiter-stripped flattening a renderer displays,
//! while spans index the original Markdown. A highlight request arrives in
//! rendered coordinates ("highlight characters 5 to 15 of what is on
//! screen"); [`RenderedMap`] resolves it to the nodes underneath without
//! re-parsing.

use crate::ast::{BlockNode, InlineNode};
use crate::document::Document;
use crate::span::Span;

/// Half-open byte range in rendered-text coordinates.
///
/// Deliberately a distinct type from [`Span`]: mixing the two address
/// spaces is the classic off-by-one source, so conversions only happen
/// inside [`RenderedMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct RenderedRange {
    pub start: usize,
    pub len: usize,
}

impl RenderedRange {
    #[must_use]
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    #[must_use]
    pub fn end(self) -> usize {
        self.start + self.len
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len == 0
    }
}

/// Child-index path from the document root to a node.
///
/// For a `List` block the next index selects the item, then the index after
/// that the block within the item. Paths are the node identity handed to
/// renderers; [`NodePath::resolve`] turns one back into a node reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct NodePath(Vec<usize>);

/// A resolved path target: block or inline node.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Block(&'a BlockNode),
    Inline(&'a InlineNode),
}

impl NodePath {
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Walks the document down this path.
    pub fn resolve<'a>(&self, doc: &'a Document) -> Option<NodeRef<'a>> {
        let mut idx = self.0.iter().copied();
        let mut current = NodeRef::Block(doc.blocks().get(idx.next()?)?);
        while let Some(i) = idx.next() {
            current = match current {
                NodeRef::Block(BlockNode::BlockQuote { blocks, .. }) => {
                    NodeRef::Block(blocks.get(i)?)
                }
                NodeRef::Block(BlockNode::List { items, .. }) => {
                    // Two steps: the item index, then the block within it.
                    NodeRef::Block(items.get(i)?.blocks.get(idx.next()?)?)
                }
                NodeRef::Block(b) => NodeRef::Inline(b.inlines().get(i)?),
                NodeRef::Inline(n) => NodeRef::Inline(n.children().get(i)?),
            };
        }
        Some(current)
    }
}

/// One contiguous run of rendered text contributed by a single leaf node.
#[derive(Debug, Clone)]
struct Segment {
    rendered: RenderedRange,
    path: NodePath,
    source: Span,
    /// Rendered bytes equal source bytes, so sub-ranges map exactly.
    exact: bool,
}

/// The covered portion of one node, as returned by [`RenderedMap::map_range`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeHighlight {
    /// Identity of the intersected leaf node.
    pub path: NodePath,
    /// Sub-range within that node's rendered span.
    pub range: RenderedRange,
    /// Source bytes covered: exact when the node's rendered text is a
    /// verbatim source slice, otherwise the node's full span.
    pub source: Span,
}

/// Errors from highlight mapping.
///
/// Out-of-range requests are rejected rather than clamped so callers can
/// detect stale highlight state after the document changed. Negative
/// offsets are unrepresentable by construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HighlightError {
    #[error("highlight range {requested:?} exceeds the rendered length {rendered_len}")]
    OutOfRange {
        requested: RenderedRange,
        rendered_len: usize,
    },
}

/// Rendered-offset index over a document.
///
/// The rendered text is defined as: for each leaf block in document order,
/// its inline literals (text, code, and HTML content, `\n` for soft and
/// hard breaks) or its literal content for code and HTML blocks, followed
/// by one `\n` closing the block. A derived view, not part of document
/// identity: rebuild it whenever the document changes. Construction walks
/// the tree once, so rebuilding per interactive update is cheap for
/// Markdown-sized documents.
pub struct RenderedMap {
    segments: Vec<Segment>,
    text: String,
}

impl RenderedMap {
    #[must_use]
    pub fn new(doc: &Document) -> Self {
        let mut map = Self {
            segments: Vec::new(),
            text: String::new(),
        };
        let mut path = Vec::new();
        for (i, block) in doc.blocks().iter().enumerate() {
            path.push(i);
            map.add_block(block, &mut path);
            path.pop();
        }
        map
    }

    /// Total rendered length in bytes.
    #[must_use]
    pub fn rendered_len(&self) -> usize {
        self.text.len()
    }

    /// The flattened text the offsets address.
    #[must_use]
    pub fn rendered_text(&self) -> &str {
        &self.text
    }

    /// Resolves a rendered-space range to the leaf nodes underneath it.
    ///
    /// Returns one entry per intersected node in document order, each with
    /// the covered sub-range relative to the node's own rendered span. A
    /// zero-length range maps to nothing; a range ending past
    /// [`Self::rendered_len`] is an error.
    pub fn map_range(&self, range: RenderedRange) -> Result<Vec<NodeHighlight>, HighlightError> {
        if range.end() > self.text.len() {
            return Err(HighlightError::OutOfRange {
                requested: range,
                rendered_len: self.text.len(),
            });
        }
        if range.is_empty() {
            return Ok(Vec::new());
        }
        let mut out = Vec::new();
        for seg in &self.segments {
            let lo = range.start.max(seg.rendered.start);
            let hi = range.end().min(seg.rendered.end());
            if lo >= hi {
                continue;
            }
            let within = RenderedRange::new(lo - seg.rendered.start, hi - lo);
            let source = if seg.exact {
                Span::new(seg.source.start + within.start, within.len)
            } else {
                seg.source
            };
            out.push(NodeHighlight {
                path: seg.path.clone(),
                range: within,
                source,
            });
        }
        Ok(out)
    }

    fn add_block(&mut self, block: &BlockNode, path: &mut Vec<usize>) {
        match block {
            BlockNode::Paragraph { inlines, .. } | BlockNode::Heading { inlines, .. } => {
                for (i, inline) in inlines.iter().enumerate() {
                    path.push(i);
                    self.add_inline(inline, path);
                    path.pop();
                }
                self.text.push('\n');
            }
            BlockNode::BlockQuote { blocks, .. } => {
                for (i, b) in blocks.iter().enumerate() {
                    path.push(i);
                    self.add_block(b, path);
                    path.pop();
                }
            }
            BlockNode::List { items, .. } => {
                for (i, item) in items.iter().enumerate() {
                    for (j, b) in item.blocks.iter().enumerate() {
                        path.push(i);
                        path.push(j);
                        self.add_block(b, path);
                        path.pop();
                        path.pop();
                    }
                }
            }
            BlockNode::CodeBlock { literal, span, .. }
            | BlockNode::HtmlBlock { literal, span } => {
                self.push_segment(literal, path, *span);
                self.text.push('\n');
            }
            BlockNode::ThematicBreak { .. } => self.text.push('\n'),
        }
    }

    fn add_inline(&mut self, inline: &InlineNode, path: &mut Vec<usize>) {
        match inline {
            InlineNode::Text { literal, span } => self.push_segment(literal, path, *span),
            InlineNode::Code { literal, span } => self.push_segment(literal, path, *span),
            InlineNode::Html { literal, span } => self.push_segment(literal, path, *span),
            InlineNode::SoftBreak { span } | InlineNode::LineBreak { span } => {
                self.push_segment("\n", path, *span);
            }
            InlineNode::Emphasis { children, .. }
            | InlineNode::Strong { children, .. }
            | InlineNode::Strikethrough { children, .. }
            | InlineNode::Link { children, .. }
            | InlineNode::Image { children, .. } => {
                for (i, child) in children.iter().enumerate() {
                    path.push(i);
                    self.add_inline(child, path);
                    path.pop();
                }
            }
        }
    }

    fn push_segment(&mut self, rendered: &str, path: &[usize], source: Span) {
        if rendered.is_empty() {
            return;
        }
        let start = self.text.len();
        self.text.push_str(rendered);
        self.segments.push(Segment {
            rendered: RenderedRange::new(start, rendered.len()),
            path: NodePath(path.to_vec()),
            source,
            exact: rendered.len() == source.len,
        });
    }
}
