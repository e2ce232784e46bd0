use crate::ast::{BlockNode, InlineNode, ListItem};
use crate::parsing::inline::{self, Part};
use crate::parsing::lines::Line;
use crate::parsing::{MAX_NESTING_DEPTH, ParseError};
use crate::span::Span;

use super::classify::{Opener, classify, is_paragraph_continuation};
use super::kinds::{BlockQuote, CodeFence, FenceSig, ListMarker, ThematicBreak};

/// Folds classified lines into a block tree.
///
/// Containers strip their prefixes and recurse on the remaining sub-lines;
/// since stripped lines stay slices of the original source, every span is
/// already in document coordinates.
pub(crate) fn parse_blocks(lines: &[Line<'_>], depth: usize) -> Result<Vec<BlockNode>, ParseError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(ParseError::TooDeeplyNested {
            depth,
            max: MAX_NESTING_DEPTH,
        });
    }

    let mut out = Vec::new();
    let mut i = 0usize;
    while i < lines.len() {
        let c = classify(&lines[i]);
        if c.is_blank {
            i += 1;
            continue;
        }
        match c.opener {
            Some(Opener::Quote) => {
                let (node, next) = take_quote(lines, i, depth)?;
                out.push(node);
                i = next;
            }
            Some(Opener::ThematicBreak) => {
                out.push(BlockNode::ThematicBreak {
                    span: lines[i].span,
                });
                i += 1;
            }
            Some(Opener::Atx { level, content }) => {
                out.push(heading(&lines[i], level, content));
                i += 1;
            }
            Some(Opener::Fence { sig, info }) => {
                let (node, next) = take_fence(lines, i, sig, &info);
                out.push(node);
                i = next;
            }
            Some(Opener::Html) => {
                let (node, next) = take_html(lines, i);
                out.push(node);
                i = next;
            }
            Some(Opener::List(marker)) => {
                let (node, next) = take_list(lines, i, marker, depth)?;
                out.push(node);
                i = next;
            }
            None => {
                let (node, next) = take_paragraph(lines, i);
                out.push(node);
                i = next;
            }
        }
    }
    Ok(out)
}

/// Inline-parseable slice of one line: leading whitespace stripped, trailing
/// spaces kept (they may form a hard break).
fn part_of<'a>(line: &Line<'a>) -> Part<'a> {
    let text = line.text();
    let skip = text
        .bytes()
        .take_while(|&b| b == b' ' || b == b'\t')
        .count();
    Part {
        span: Span::from_bounds(line.span.start + skip, line.content_end()),
        text: &text[skip..],
    }
}

fn heading(line: &Line<'_>, level: u8, content: std::ops::Range<usize>) -> BlockNode {
    let text = line.text();
    let part = Part {
        span: Span::from_bounds(line.span.start + content.start, line.span.start + content.end),
        text: &text[content.clone()],
    };
    let inlines: Vec<InlineNode> = if part.text.is_empty() {
        Vec::new()
    } else {
        inline::parse_parts(&[part])
    };
    BlockNode::Heading {
        inlines,
        level,
        span: line.span,
    }
}

fn take_paragraph<'a>(lines: &[Line<'a>], start: usize) -> (BlockNode, usize) {
    let mut parts = vec![part_of(&lines[start])];
    let mut i = start + 1;
    while i < lines.len() && is_paragraph_continuation(&lines[i]) {
        parts.push(part_of(&lines[i]));
        i += 1;
    }
    let span = Span::from_bounds(lines[start].span.start, lines[i - 1].span.end());
    (
        BlockNode::Paragraph {
            inlines: inline::parse_parts(&parts),
            span,
        },
        i,
    )
}

fn take_fence(lines: &[Line<'_>], start: usize, sig: FenceSig, info: &str) -> (BlockNode, usize) {
    let mut literal = String::new();
    let mut end = lines[start].span.end();
    let mut i = start + 1;
    while i < lines.len() {
        end = lines[i].span.end();
        if CodeFence::closes(sig, lines[i].text()) {
            i += 1;
            break;
        }
        // Content lines drop up to the opening fence's indent.
        let strip = lines[i]
            .raw
            .bytes()
            .take_while(|&b| b == b' ')
            .count()
            .min(sig.indent);
        literal.push_str(&lines[i].raw[strip..]);
        i += 1;
    }
    let language = info.split_whitespace().next().map(str::to_string);
    (
        BlockNode::CodeBlock {
            literal,
            language,
            span: Span::from_bounds(lines[start].span.start, end),
        },
        i,
    )
}

fn take_html(lines: &[Line<'_>], start: usize) -> (BlockNode, usize) {
    let mut literal = String::new();
    let mut i = start;
    while i < lines.len() && !classify(&lines[i]).is_blank {
        literal.push_str(lines[i].raw);
        i += 1;
    }
    let span = Span::from_bounds(lines[start].span.start, lines[i - 1].span.end());
    (BlockNode::HtmlBlock { literal, span }, i)
}

fn take_quote<'a>(
    lines: &[Line<'a>],
    start: usize,
    depth: usize,
) -> Result<(BlockNode, usize), ParseError> {
    let mut inner: Vec<Line<'a>> = Vec::new();
    let mut end = lines[start].span.end();
    let mut i = start;
    while i < lines.len() {
        let text = lines[i].text();
        if let Some(at) = BlockQuote::marker(text) {
            inner.push(lines[i].strip_prefix_bytes(at));
        } else if inner_ends_in_paragraph(&inner) && is_paragraph_continuation(&lines[i]) {
            // Lazy continuation: an unmarked line extends the quoted paragraph.
            inner.push(lines[i]);
        } else {
            break;
        }
        end = lines[i].span.end();
        i += 1;
    }
    let blocks = parse_blocks(&inner, depth + 1)?;
    Ok((
        BlockNode::BlockQuote {
            blocks,
            span: Span::from_bounds(lines[start].span.start, end),
        },
        i,
    ))
}

fn inner_ends_in_paragraph(inner: &[Line<'_>]) -> bool {
    inner.last().is_some_and(|l| is_paragraph_continuation(l))
}

fn take_list<'a>(
    lines: &[Line<'a>],
    start: usize,
    first_marker: ListMarker,
    depth: usize,
) -> Result<(BlockNode, usize), ParseError> {
    let mut items = Vec::new();
    let mut i = start;
    let mut end = lines[start].span.end();

    while i < lines.len() {
        let text = lines[i].text();
        if ThematicBreak::matches(text) {
            break;
        }
        let Some(marker) = ListMarker::parse(text) else {
            break;
        };
        if !first_marker.continues(&marker) {
            break;
        }

        let item_start = i;
        let mut inner: Vec<Line<'a>> =
            vec![lines[i].strip_prefix_bytes(marker.content_col.min(lines[i].raw.len()))];
        let mut item_end = lines[i].span.end();
        i += 1;

        let mut pending_blanks: Vec<Line<'a>> = Vec::new();
        while i < lines.len() {
            let t = lines[i].text();
            if classify(&lines[i]).is_blank {
                pending_blanks.push(lines[i].strip_prefix_bytes(lines[i].raw.len()));
                i += 1;
                continue;
            }
            let indent = t.bytes().take_while(|&b| b == b' ').count();
            if indent >= marker.content_col {
                inner.append(&mut pending_blanks);
                inner.push(lines[i].strip_prefix_bytes(marker.content_col));
                item_end = lines[i].span.end();
                i += 1;
                continue;
            }
            if pending_blanks.is_empty()
                && inner_ends_in_paragraph(&inner)
                && is_paragraph_continuation(&lines[i])
            {
                // Lazy continuation of the item's trailing paragraph.
                inner.push(lines[i]);
                item_end = lines[i].span.end();
                i += 1;
                continue;
            }
            break;
        }

        items.push(ListItem {
            blocks: parse_blocks(&inner, depth + 1)?,
            span: Span::from_bounds(lines[item_start].span.start, item_end),
        });
        end = item_end;
    }

    Ok((
        BlockNode::List {
            items,
            style: first_marker.style,
            span: Span::from_bounds(lines[start].span.start, end),
        },
        i,
    ))
}
