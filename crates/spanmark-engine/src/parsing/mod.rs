pub(crate) mod blocks;
pub(crate) mod inline;
pub(crate) mod lines;
pub mod snapshot;

use crate::ast::{BlockNode, InlineNode};

/// Maximum container nesting (quotes, list items) before parsing fails.
///
/// Bounds recursion on pathological input like thousands of `>` prefixes;
/// exceeding it is the parser's only structural failure mode.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Why a parse failed.
///
/// Malformed Markdown is never a failure - CommonMark defines a literal-text
/// fallback for every locally broken construct. Only structural problems
/// surface here.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("nesting depth {depth} exceeds the maximum of {max}")]
    TooDeeplyNested { depth: usize, max: usize },
    #[error("input is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),
}

/// Parses a complete source text into its block tree.
///
/// Runs the line-oriented block pass (which recurses into containers, depth
/// guarded) and the per-leaf inline pass, then bounds the finished tree's
/// inline nesting too: emphasis nesting is produced iteratively, so it is a
/// check on the result rather than a recursion bound.
pub(crate) fn parse_document(source: &str) -> Result<Vec<BlockNode>, ParseError> {
    let lines = lines::lines_with_spans(source);
    let blocks = blocks::parse_blocks(&lines, 0)?;
    let depth = max_inline_depth(&blocks);
    if depth > MAX_NESTING_DEPTH {
        return Err(ParseError::TooDeeplyNested {
            depth,
            max: MAX_NESTING_DEPTH,
        });
    }
    Ok(blocks)
}

enum NodeRef<'a> {
    Block(&'a BlockNode),
    Inline(&'a InlineNode),
}

/// Deepest inline-within-inline chain anywhere in the tree, walked with an
/// explicit stack so the check itself cannot overflow on the trees it is
/// guarding against. Container depth is bounded separately by the block
/// pass, so consumers recursing over the tree see at most
/// `2 * MAX_NESTING_DEPTH` levels.
fn max_inline_depth(blocks: &[BlockNode]) -> usize {
    let mut deepest = 0usize;
    let mut stack: Vec<(NodeRef<'_>, usize)> =
        blocks.iter().map(|b| (NodeRef::Block(b), 0)).collect();
    while let Some((node, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        match node {
            NodeRef::Block(b) => {
                for child in b.child_blocks() {
                    stack.push((NodeRef::Block(child), 0));
                }
                for inline in b.inlines() {
                    stack.push((NodeRef::Inline(inline), 1));
                }
            }
            NodeRef::Inline(i) => {
                for child in i.children() {
                    stack.push((NodeRef::Inline(child), depth + 1));
                }
            }
        }
    }
    deepest
}
