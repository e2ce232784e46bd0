use crate::ast::InlineNode;

use super::cursor::Cursor;
use super::emphasis;
use super::input::InlineInput;
use super::kinds::{Autolink, CodeSpan, HtmlTag, LinkSuffix};

/// An emphasis delimiter run awaiting resolution.
///
/// `lo..hi` is the local range of the *remaining* delimiter characters;
/// both shrink as emphasis matching consumes them from the inside out.
#[derive(Debug, Clone, Copy)]
pub(super) struct Delim {
    pub lo: usize,
    pub hi: usize,
    pub ch: u8,
    pub count: usize,
    /// Length of the run as scanned, for the multiple-of-3 rule.
    pub orig_count: usize,
    pub can_open: bool,
    pub can_close: bool,
}

/// A pending `[` or `![` awaiting its `](...)` suffix.
#[derive(Debug, Clone, Copy)]
pub(super) struct Bracket {
    pub lo: usize,
    pub hi: usize,
    pub image: bool,
    pub active: bool,
}

/// Scanner output: finished nodes interleaved with unresolved markers.
pub(super) enum Atom {
    Node(InlineNode),
    Delim(Delim),
    Bracket(Bracket),
}

/// First inline pass: tokenizes the joined content into atoms.
///
/// Code spans, autolinks, and raw HTML are resolved here (raw zones bind
/// tightest); links collapse as soon as their `](...)` suffix is seen, so
/// emphasis can never straddle a link boundary. Emphasis delimiters are
/// collected for [`emphasis::process`].
pub(super) fn scan(input: &InlineInput) -> Vec<Atom> {
    let text = input.text();
    let mut cur = Cursor::new(text);
    let mut atoms: Vec<Atom> = Vec::new();
    let mut text_start = 0usize;

    while let Some(b) = cur.peek() {
        let i = cur.pos();
        match b {
            b'\\' => match cur.peek_at(1) {
                Some(b'\n') => {
                    flush_text(&mut atoms, input, text_start, i);
                    atoms.push(Atom::Node(InlineNode::LineBreak {
                        span: input.abs_span(i, i + 2),
                    }));
                    cur.bump_n(2);
                    text_start = cur.pos();
                }
                Some(c) if c.is_ascii_punctuation() => {
                    flush_text(&mut atoms, input, text_start, i);
                    atoms.push(Atom::Node(InlineNode::Text {
                        literal: (c as char).to_string(),
                        span: input.abs_span(i, i + 2),
                    }));
                    cur.bump_n(2);
                    text_start = cur.pos();
                }
                _ => {
                    cur.bump();
                }
            },
            b'\n' => {
                // Trailing spaces belong to the break, two or more making
                // it hard.
                let bytes = text.as_bytes();
                let mut ws = i;
                while ws > text_start && bytes[ws - 1] == b' ' {
                    ws -= 1;
                }
                flush_text(&mut atoms, input, text_start, ws);
                let span = input.abs_span(ws, i + 1);
                atoms.push(Atom::Node(if i - ws >= 2 {
                    InlineNode::LineBreak { span }
                } else {
                    InlineNode::SoftBreak { span }
                }));
                cur.bump();
                text_start = cur.pos();
            }
            b'`' => {
                if let Some((literal, end)) = CodeSpan::scan(text, i) {
                    flush_text(&mut atoms, input, text_start, i);
                    atoms.push(Atom::Node(InlineNode::Code {
                        literal,
                        span: input.abs_span(i, end),
                    }));
                    cur.bump_n(end - i);
                    text_start = cur.pos();
                } else {
                    // Unclosed run stays literal text.
                    cur.bump_n(cur.run_len(b'`'));
                }
            }
            b'<' => {
                if let Some((url, label, len)) = Autolink::scan(cur.rest()) {
                    flush_text(&mut atoms, input, text_start, i);
                    let children = vec![InlineNode::Text {
                        literal: label,
                        span: input.abs_span(i + 1, i + len - 1),
                    }];
                    atoms.push(Atom::Node(InlineNode::Link {
                        children,
                        url,
                        span: input.abs_span(i, i + len),
                    }));
                    cur.bump_n(len);
                    text_start = cur.pos();
                } else if let Some(len) = HtmlTag::scan(cur.rest()) {
                    flush_text(&mut atoms, input, text_start, i);
                    atoms.push(Atom::Node(InlineNode::Html {
                        literal: text[i..i + len].to_string(),
                        span: input.abs_span(i, i + len),
                    }));
                    cur.bump_n(len);
                    text_start = cur.pos();
                } else {
                    cur.bump();
                }
            }
            b'[' => {
                flush_text(&mut atoms, input, text_start, i);
                atoms.push(Atom::Bracket(Bracket {
                    lo: i,
                    hi: i + 1,
                    image: false,
                    active: true,
                }));
                cur.bump();
                text_start = cur.pos();
            }
            b'!' if cur.peek_at(1) == Some(b'[') => {
                flush_text(&mut atoms, input, text_start, i);
                atoms.push(Atom::Bracket(Bracket {
                    lo: i,
                    hi: i + 2,
                    image: true,
                    active: true,
                }));
                cur.bump_n(2);
                text_start = cur.pos();
            }
            b']' => {
                flush_text(&mut atoms, input, text_start, i);
                cur.bump();
                close_bracket(&mut atoms, input, &mut cur, i);
                text_start = cur.pos();
            }
            b'*' | b'_' | b'~' => {
                let count = cur.run_len(b);
                if b == b'~' && count != 2 {
                    // Only double tildes delimit strikethrough.
                    cur.bump_n(count);
                    continue;
                }
                flush_text(&mut atoms, input, text_start, i);
                let before = cur.char_before().unwrap_or('\n');
                cur.bump_n(count);
                let after = cur.char_here().unwrap_or('\n');
                let (can_open, can_close) = flanking(b, before, after);
                atoms.push(Atom::Delim(Delim {
                    lo: i,
                    hi: i + count,
                    ch: b,
                    count,
                    orig_count: count,
                    can_open,
                    can_close,
                }));
                text_start = cur.pos();
            }
            _ => {
                cur.bump();
            }
        }
    }

    // Trailing whitespace on the last line is not content.
    let mut end = cur.pos();
    let bytes = text.as_bytes();
    while end > text_start && (bytes[end - 1] == b' ' || bytes[end - 1] == b'\t') {
        end -= 1;
    }
    flush_text(&mut atoms, input, text_start, end);
    atoms
}

/// Resolves a `]`: collapse the nearest active opener into a link or image
/// when a valid `(...)` suffix follows, else leave literal text behind.
fn close_bracket(atoms: &mut Vec<Atom>, input: &InlineInput, cur: &mut Cursor<'_>, close_at: usize) {
    let opener = atoms
        .iter()
        .rposition(|a| matches!(a, Atom::Bracket(b) if b.active));
    let Some(oi) = opener else {
        push_literal(atoms, input, close_at);
        return;
    };

    let Some((url, consumed)) = LinkSuffix::scan(cur.rest()) else {
        // A failed match retires the opener for good.
        if let Atom::Bracket(b) = &mut atoms[oi] {
            b.active = false;
        }
        push_literal(atoms, input, close_at);
        return;
    };

    let mut inner: Vec<Atom> = atoms.split_off(oi + 1);
    let Some(Atom::Bracket(br)) = atoms.pop() else {
        unreachable!("opener index points at a bracket");
    };
    emphasis::process(&mut inner, input);
    let children = finalize(inner, input);
    let span = input.abs_span(br.lo, close_at + 1 + consumed);
    if br.image {
        atoms.push(Atom::Node(InlineNode::Image {
            children,
            url,
            span,
        }));
    } else {
        // Links cannot contain links; earlier link openers are dead now.
        for a in atoms.iter_mut() {
            if let Atom::Bracket(b) = a
                && !b.image
            {
                b.active = false;
            }
        }
        atoms.push(Atom::Node(InlineNode::Link {
            children,
            url,
            span,
        }));
    }
    cur.bump_n(consumed);
}

fn push_literal(atoms: &mut Vec<Atom>, input: &InlineInput, at: usize) {
    atoms.push(Atom::Node(InlineNode::Text {
        literal: "]".to_string(),
        span: input.abs_span(at, at + 1),
    }));
}

/// Left/right flanking per the CommonMark delimiter-run rules. `_` gets the
/// stricter intraword restriction.
fn flanking(ch: u8, before: char, after: char) -> (bool, bool) {
    let ws_before = before.is_whitespace();
    let ws_after = after.is_whitespace();
    let punct_before = !before.is_alphanumeric() && !ws_before;
    let punct_after = !after.is_alphanumeric() && !ws_after;

    let left = !ws_after && (!punct_after || ws_before || punct_before);
    let right = !ws_before && (!punct_before || ws_after || punct_after);

    match ch {
        b'_' => (
            left && (!right || punct_before),
            right && (!left || punct_after),
        ),
        _ => (left, right),
    }
}

fn flush_text(atoms: &mut Vec<Atom>, input: &InlineInput, start: usize, end: usize) {
    if end > start {
        atoms.push(Atom::Node(InlineNode::Text {
            literal: input.text()[start..end].to_string(),
            span: input.abs_span(start, end),
        }));
    }
}

/// Converts leftover markers to text and merges adjacent text nodes.
pub(super) fn finalize(atoms: Vec<Atom>, input: &InlineInput) -> Vec<InlineNode> {
    let text = input.text();
    let mut out: Vec<InlineNode> = Vec::new();
    for atom in atoms {
        let node = match atom {
            Atom::Node(n) => n,
            Atom::Delim(d) => InlineNode::Text {
                literal: text[d.lo..d.hi].to_string(),
                span: input.abs_span(d.lo, d.hi),
            },
            Atom::Bracket(b) => InlineNode::Text {
                literal: text[b.lo..b.hi].to_string(),
                span: input.abs_span(b.lo, b.hi),
            },
        };
        match (out.last_mut(), node) {
            (
                Some(InlineNode::Text {
                    literal: prev,
                    span: prev_span,
                }),
                InlineNode::Text { literal, span },
            ) => {
                prev.push_str(&literal);
                *prev_span = prev_span.union(span);
            }
            (_, node) => out.push(node),
        }
    }
    out
}
