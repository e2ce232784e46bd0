use crate::ast::{BlockNode, InlineNode};
use crate::document::Document;
use crate::span::Span;

/// Asserts the span well-formedness rules over a whole document:
/// every span in bounds and on char boundaries, every child span contained
/// in its parent's. Test helper; panics with context on violation.
pub fn check(doc: &Document) {
    let source = doc.source();
    for block in doc.blocks() {
        check_block(source, block);
    }
}

fn check_span(source: &str, span: Span) {
    assert!(
        span.end() <= source.len(),
        "span out of bounds: {span:?} (source len {})",
        source.len()
    );
    assert!(
        source.is_char_boundary(span.start) && source.is_char_boundary(span.end()),
        "span not on char boundaries: {span:?}"
    );
}

fn check_block(source: &str, block: &BlockNode) {
    let span = block.span();
    check_span(source, span);
    for child in block.child_blocks() {
        assert!(
            span.contains(child.span()),
            "child block {:?} escapes parent {span:?}",
            child.span()
        );
        check_block(source, child);
    }
    if let BlockNode::List { items, .. } = block {
        for item in items {
            check_span(source, item.span);
            assert!(
                span.contains(item.span),
                "list item {:?} escapes list {span:?}",
                item.span
            );
            for b in &item.blocks {
                assert!(
                    item.span.contains(b.span()),
                    "item block {:?} escapes item {:?}",
                    b.span(),
                    item.span
                );
            }
        }
    }
    for inline in block.inlines() {
        assert!(
            span.contains(inline.span()),
            "inline {:?} escapes block {span:?}",
            inline.span()
        );
        check_inline(source, inline);
    }
}

fn check_inline(source: &str, inline: &InlineNode) {
    let span = inline.span();
    check_span(source, span);
    for child in inline.children() {
        assert!(
            span.contains(child.span()),
            "inline child {:?} escapes parent {span:?}",
            child.span()
        );
        check_inline(source, child);
    }
}
