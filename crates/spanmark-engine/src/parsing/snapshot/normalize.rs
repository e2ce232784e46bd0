use serde::Serialize;

use crate::ast::{BlockNode, InlineNode, ListStyle};
use crate::document::Document;
use crate::span::Span;

/// Serializable view of a parsed document for snapshot tests.
#[derive(Serialize)]
pub struct Snap {
    pub canonical: String,
    pub blocks: Vec<BlockSnap>,
}

#[derive(Serialize)]
pub struct BlockSnap {
    pub kind: String,
    pub span: (usize, usize),
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inline: Vec<InlineSnap>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BlockSnap>,
}

#[derive(Serialize)]
pub struct InlineSnap {
    pub kind: String,
    pub span: (usize, usize),
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<InlineSnap>,
}

pub fn normalize(doc: &Document) -> Snap {
    Snap {
        canonical: doc.canonicalize(),
        blocks: doc
            .blocks()
            .iter()
            .map(|b| block_snap(doc.source(), b))
            .collect(),
    }
}

fn block_snap(source: &str, block: &BlockNode) -> BlockSnap {
    let kind = match block {
        BlockNode::Paragraph { .. } => "Paragraph".to_string(),
        BlockNode::Heading { level, .. } => format!("Heading({level})"),
        BlockNode::BlockQuote { .. } => "BlockQuote".to_string(),
        BlockNode::List { style, .. } => match style {
            ListStyle::Ordered => "List(Ordered)".to_string(),
            ListStyle::Bullet => "List(Bullet)".to_string(),
        },
        BlockNode::CodeBlock { language, .. } => match language {
            Some(lang) => format!("CodeBlock({lang})"),
            None => "CodeBlock".to_string(),
        },
        BlockNode::HtmlBlock { .. } => "HtmlBlock".to_string(),
        BlockNode::ThematicBreak { .. } => "ThematicBreak".to_string(),
    };

    let children = match block {
        BlockNode::BlockQuote { blocks, .. } => {
            blocks.iter().map(|b| block_snap(source, b)).collect()
        }
        BlockNode::List { items, .. } => items
            .iter()
            .map(|item| BlockSnap {
                kind: "Item".to_string(),
                span: (item.span.start, item.span.end()),
                text: preview(source, item.span, 80),
                inline: Vec::new(),
                children: item.blocks.iter().map(|b| block_snap(source, b)).collect(),
            })
            .collect(),
        _ => Vec::new(),
    };

    BlockSnap {
        kind,
        span: (block.span().start, block.span().end()),
        text: preview(source, block.span(), 80),
        inline: block
            .inlines()
            .iter()
            .map(|i| inline_snap(source, i))
            .collect(),
        children,
    }
}

fn inline_snap(source: &str, inline: &InlineNode) -> InlineSnap {
    let kind = match inline {
        InlineNode::Text { .. } => "Text",
        InlineNode::SoftBreak { .. } => "SoftBreak",
        InlineNode::LineBreak { .. } => "LineBreak",
        InlineNode::Code { .. } => "Code",
        InlineNode::Html { .. } => "Html",
        InlineNode::Emphasis { .. } => "Emphasis",
        InlineNode::Strong { .. } => "Strong",
        InlineNode::Strikethrough { .. } => "Strikethrough",
        InlineNode::Link { .. } => "Link",
        InlineNode::Image { .. } => "Image",
    };
    InlineSnap {
        kind: kind.to_string(),
        span: (inline.span().start, inline.span().end()),
        text: preview(source, inline.span(), 60),
        children: inline
            .children()
            .iter()
            .map(|c| inline_snap(source, c))
            .collect(),
    }
}

/// Short, newline-escaped excerpt of the source bytes under a span.
fn preview(source: &str, span: Span, max: usize) -> String {
    let slice = source.get(span.range()).unwrap_or_default();
    let escaped = slice.replace('\n', "\\n");
    escaped.chars().take(max).collect()
}
