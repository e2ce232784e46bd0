use super::kinds::{AtxHeading, BlockQuote, CodeFence, FenceSig, HtmlBlock, ListMarker, ThematicBreak};
use crate::parsing::lines::Line;

/// What a line can open, from local facts alone.
///
/// Containers come first: a quote marker wins over anything after it, since
/// the rest of the line is quoted content and is re-classified one level in.
#[derive(Debug, Clone)]
pub(crate) enum Opener {
    Quote,
    ThematicBreak,
    Atx {
        level: u8,
        /// Local byte range of the heading text.
        content: std::ops::Range<usize>,
    },
    Fence {
        sig: FenceSig,
        info: String,
    },
    Html,
    List(ListMarker),
}

/// Classification of a single line: phase 1 of block parsing.
#[derive(Debug, Clone)]
pub(crate) struct LineClass {
    pub is_blank: bool,
    pub opener: Option<Opener>,
}

/// Classifies a line into local facts, without surrounding context.
pub(crate) fn classify(line: &Line<'_>) -> LineClass {
    let t = line.text();
    if t.trim().is_empty() {
        return LineClass {
            is_blank: true,
            opener: None,
        };
    }

    let opener = if BlockQuote::marker(t).is_some() {
        Some(Opener::Quote)
    } else if ThematicBreak::matches(t) {
        Some(Opener::ThematicBreak)
    } else if let Some((level, content)) = AtxHeading::parse(t) {
        Some(Opener::Atx { level, content })
    } else if let Some((sig, info)) = CodeFence::open(t) {
        Some(Opener::Fence {
            sig,
            info: info.to_string(),
        })
    } else if HtmlBlock::opens(t) {
        Some(Opener::Html)
    } else {
        ListMarker::parse(t).map(Opener::List)
    };

    LineClass {
        is_blank: false,
        opener,
    }
}

/// True when the line would continue a paragraph rather than open anything.
pub(crate) fn is_paragraph_continuation(line: &Line<'_>) -> bool {
    let c = classify(line);
    if c.is_blank {
        return false;
    }
    match c.opener {
        None => true,
        // An empty list item cannot interrupt a paragraph.
        Some(Opener::List(m)) => m.empty,
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::lines::lines_with_spans;

    fn class_of(s: &str) -> LineClass {
        classify(&lines_with_spans(s)[0])
    }

    #[test]
    fn blank_line() {
        assert!(class_of("   \n").is_blank);
    }

    #[test]
    fn quote_wins_over_leaf_openers() {
        let c = class_of("> # not classified here\n");
        assert!(matches!(c.opener, Some(Opener::Quote)));
    }

    #[test]
    fn thematic_break_wins_over_bullet() {
        let c = class_of("- - -\n");
        assert!(matches!(c.opener, Some(Opener::ThematicBreak)));
    }

    #[test]
    fn plain_text_opens_nothing() {
        let c = class_of("Hello world!\n");
        assert!(c.opener.is_none());
        assert!(!c.is_blank);
    }

    #[test]
    fn empty_list_item_continues_paragraph() {
        let lines = lines_with_spans("-\n");
        assert!(is_paragraph_continuation(&lines[0]));
        let lines = lines_with_spans("- item\n");
        assert!(!is_paragraph_continuation(&lines[0]));
    }
}
