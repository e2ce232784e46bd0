//! Canonical Markdown rendering.
//!
//! `__x__` and `**x**` parse to different source text but the same canonical
//! form; document equality compares canonical strings instead of walking two
//! trees with delimiter special cases. The renderer is deterministic and
//! idempotent: parsing its output and rendering again reproduces it.

use crate::ast::{BlockNode, InlineNode, ListStyle};
use crate::parsing::blocks::kinds::{AtxHeading, CodeFence, ListMarker, ThematicBreak};
use crate::parsing::inline::kinds::Autolink;

/// Renders the canonical Markdown text of a block sequence.
pub(crate) fn render_blocks(blocks: &[BlockNode]) -> String {
    let mut out = String::new();
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        render_block(block, &mut out);
    }
    out
}

fn render_block(block: &BlockNode, out: &mut String) {
    match block {
        BlockNode::Paragraph { inlines, .. } => {
            let body = render_inlines(inlines);
            for (i, line) in body.split('\n').enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                push_guarded_line(line, out);
            }
            out.push('\n');
        }
        BlockNode::Heading {
            inlines, level, ..
        } => {
            for _ in 0..*level {
                out.push('#');
            }
            let body = render_inlines(inlines);
            if !body.is_empty() {
                out.push(' ');
                out.push_str(&body);
            }
            out.push('\n');
        }
        BlockNode::BlockQuote { blocks, .. } => {
            let inner = render_blocks(blocks);
            if inner.is_empty() {
                out.push_str(">\n");
                return;
            }
            for line in inner.lines() {
                if line.is_empty() {
                    out.push('>');
                } else {
                    out.push_str("> ");
                    out.push_str(line);
                }
                out.push('\n');
            }
        }
        BlockNode::List { items, style, .. } => {
            for (idx, item) in items.iter().enumerate() {
                let marker = match style {
                    ListStyle::Bullet => "- ".to_string(),
                    ListStyle::Ordered => format!("{}. ", idx + 1),
                };
                let inner = render_blocks(&item.blocks);
                if inner.is_empty() {
                    out.push_str(marker.trim_end());
                    out.push('\n');
                    continue;
                }
                for (i, line) in inner.lines().enumerate() {
                    if i == 0 {
                        out.push_str(&marker);
                        out.push_str(line);
                    } else if !line.is_empty() {
                        for _ in 0..marker.len() {
                            out.push(' ');
                        }
                        out.push_str(line);
                    }
                    out.push('\n');
                }
            }
        }
        BlockNode::CodeBlock {
            literal, language, ..
        } => {
            let fence = fence_for(literal);
            out.push_str(&fence);
            // A backtick in the info string would make the fence unparseable.
            if let Some(lang) = language
                && !lang.contains('`')
            {
                out.push_str(lang);
            }
            out.push('\n');
            out.push_str(literal);
            if !literal.is_empty() && !literal.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&fence);
            out.push('\n');
        }
        BlockNode::HtmlBlock { literal, .. } => {
            out.push_str(literal);
            if !literal.ends_with('\n') {
                out.push('\n');
            }
        }
        BlockNode::ThematicBreak { .. } => out.push_str("***\n"),
    }
}

/// A backtick fence one longer than any run inside the literal.
fn fence_for(literal: &str) -> String {
    let mut longest = 0usize;
    let mut run = 0usize;
    for b in literal.bytes() {
        if b == b'`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat((longest + 1).max(3))
}

fn render_inlines(inlines: &[InlineNode]) -> String {
    let mut out = String::new();
    for node in inlines {
        let at = out.len();
        render_inline(node, &mut out);
        // A literal `!` meeting a link's `[` would reparse as an image.
        if out[at..].starts_with('[') && out[..at].ends_with('!') {
            out.insert(at - 1, '\\');
        }
    }
    out
}

fn render_inline(node: &InlineNode, out: &mut String) {
    match node {
        InlineNode::Text { literal, .. } => escape_text(literal, out),
        InlineNode::SoftBreak { .. } => out.push('\n'),
        InlineNode::LineBreak { .. } => out.push_str("\\\n"),
        InlineNode::Code { literal, .. } => {
            if literal.is_empty() {
                out.push_str("` `");
                return;
            }
            let mut longest = 0usize;
            let mut run = 0usize;
            for b in literal.bytes() {
                if b == b'`' {
                    run += 1;
                    longest = longest.max(run);
                } else {
                    run = 0;
                }
            }
            let ticks = "`".repeat(longest + 1);
            // Padding spaces keep edge backticks away from the delimiters;
            // all-space content must stay unpadded or it grows every round.
            let pad = literal.starts_with('`')
                || literal.ends_with('`')
                || (literal.starts_with(' ')
                    && literal.ends_with(' ')
                    && literal.bytes().any(|b| b != b' '));
            out.push_str(&ticks);
            if pad {
                out.push(' ');
            }
            out.push_str(literal);
            if pad {
                out.push(' ');
            }
            out.push_str(&ticks);
        }
        InlineNode::Html { literal, .. } => out.push_str(literal),
        InlineNode::Emphasis { children, .. } => {
            out.push('*');
            out.push_str(&render_inlines(children));
            out.push('*');
        }
        InlineNode::Strong { children, .. } => {
            out.push_str("**");
            out.push_str(&render_inlines(children));
            out.push_str("**");
        }
        InlineNode::Strikethrough { children, .. } => {
            out.push_str("~~");
            out.push_str(&render_inlines(children));
            out.push_str("~~");
        }
        InlineNode::Link { children, url, .. } => {
            if autolink_form(children, url) {
                out.push('<');
                out.push_str(url);
                out.push('>');
                return;
            }
            out.push('[');
            out.push_str(&render_inlines(children));
            out.push_str("](");
            push_destination(url, out);
            out.push(')');
        }
        InlineNode::Image { children, url, .. } => {
            out.push_str("![");
            out.push_str(&render_inlines(children));
            out.push_str("](");
            push_destination(url, out);
            out.push(')');
        }
    }
}

/// A link whose text repeats its destination round-trips as `<url>`,
/// provided the angle form would actually rescan as an autolink.
fn autolink_form(children: &[InlineNode], url: &str) -> bool {
    let [InlineNode::Text { literal, .. }] = children else {
        return false;
    };
    if literal.as_str() != url {
        return false;
    }
    Autolink::scan(&format!("<{url}>"))
        .is_some_and(|(dest, _, len)| len == url.len() + 2 && dest == url)
}

fn push_destination(url: &str, out: &mut String) {
    if !url.is_empty() && url.contains([' ', '\t', '\n', '(', ')']) {
        out.push('<');
        out.push_str(url);
        out.push('>');
    } else {
        out.push_str(url);
    }
}

/// Escapes the characters that would re-activate inline syntax on reparse.
fn escape_text(s: &str, out: &mut String) {
    for ch in s.chars() {
        if matches!(ch, '\\' | '`' | '*' | '_' | '~' | '[' | ']' | '<' | '>') {
            out.push('\\');
        }
        out.push(ch);
    }
}

/// Escapes a rendered paragraph line that would otherwise open a block.
///
/// Leading text like `- `, `# `, `1. `, `~~~`, or a row of dashes reads as a
/// block opener when the canonical text is reparsed; a single backslash
/// keeps it a paragraph.
fn push_guarded_line(line: &str, out: &mut String) {
    if line.is_empty() {
        return;
    }
    if ThematicBreak::matches(line)
        || AtxHeading::parse(line).is_some()
        || CodeFence::open(line).is_some()
    {
        out.push('\\');
        out.push_str(line);
        return;
    }
    if let Some(marker) = ListMarker::parse(line) {
        match marker.style {
            ListStyle::Bullet => {
                out.push('\\');
                out.push_str(line);
            }
            ListStyle::Ordered => {
                // Escape the delimiter: `12. x` becomes `12\. x`.
                let digits_end = line.bytes().take_while(|b| b.is_ascii_digit()).count();
                out.push_str(&line[..digits_end]);
                out.push('\\');
                out.push_str(&line[digits_end..]);
            }
        }
        return;
    }
    out.push_str(line);
}
