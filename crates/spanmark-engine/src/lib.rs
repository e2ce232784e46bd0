//! Range-tracked CommonMark document model.
//!
//! [`Document::parse`] turns Markdown text into an immutable tree of block
//! and inline nodes, each carrying the byte span of the source it was parsed
//! from. A [`highlight::RenderedMap`] built over the document maps ranges of
//! the rendered (delimiter-stripped) text back to those nodes, which is what
//! lets a renderer paint partial-node highlights without re-parsing.

pub mod ast;
pub mod builder;
mod canonical;
mod document;
pub mod highlight;
pub mod parsing;
mod span;

pub use ast::{BlockNode, InlineNode, ListItem, ListStyle};
pub use document::Document;
pub use highlight::{HighlightError, NodeHighlight, NodePath, NodeRef, RenderedMap, RenderedRange};
pub use parsing::{MAX_NESTING_DEPTH, ParseError};
pub use span::Span;
