mod cursor;
mod emphasis;
mod input;
pub(crate) mod kinds;
mod scan;

pub(crate) use input::Part;

use crate::ast::InlineNode;
use input::InlineInput;

/// Parses the inline content of one leaf block.
///
/// `parts` are the block's content lines, leading prefixes already stripped,
/// each with its absolute span. Returned nodes carry spans in document
/// coordinates.
pub(crate) fn parse_parts(parts: &[Part<'_>]) -> Vec<InlineNode> {
    let inp = InlineInput::new(parts);
    let mut atoms = scan::scan(&inp);
    emphasis::process(&mut atoms, &inp);
    scan::finalize(atoms, &inp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    fn parse_one(text: &str) -> Vec<InlineNode> {
        parse_parts(&[Part {
            span: Span::new(0, text.len()),
            text,
        }])
    }

    #[test]
    fn plain_text() {
        let nodes = parse_one("hello world");
        assert_eq!(
            nodes,
            vec![InlineNode::Text {
                literal: "hello world".to_string(),
                span: Span::new(0, 11),
            }]
        );
    }

    #[test]
    fn emphasis_with_underscores() {
        let nodes = parse_one("Hello _world_.");
        assert_eq!(nodes.len(), 3);
        assert_eq!(
            nodes[1],
            InlineNode::Emphasis {
                children: vec![InlineNode::Text {
                    literal: "world".to_string(),
                    span: Span::new(7, 5),
                }],
                span: Span::new(6, 7),
            }
        );
        assert_eq!(
            nodes[2],
            InlineNode::Text {
                literal: ".".to_string(),
                span: Span::new(13, 1),
            }
        );
    }

    #[test]
    fn strong_with_asterisks() {
        let nodes = parse_one("**bold** tail");
        assert!(matches!(
            &nodes[0],
            InlineNode::Strong { span, .. } if *span == Span::new(0, 8)
        ));
    }

    #[test]
    fn strong_wins_over_emphasis() {
        // Both ** and * could close; the double run binds as strong.
        let nodes = parse_one("***x***");
        let InlineNode::Emphasis { children, span } = &nodes[0] else {
            panic!("expected outer emphasis, got {nodes:?}");
        };
        assert_eq!(*span, Span::new(0, 7));
        assert!(matches!(
            &children[0],
            InlineNode::Strong { span, .. } if *span == Span::new(1, 5)
        ));
    }

    #[test]
    fn intraword_underscore_stays_text() {
        let nodes = parse_one("snake_case_name");
        assert_eq!(nodes.len(), 1);
        assert!(matches!(&nodes[0], InlineNode::Text { literal, .. } if literal == "snake_case_name"));
    }

    #[test]
    fn unmatched_delimiters_fall_back_to_text() {
        let nodes = parse_one("*unclosed");
        assert_eq!(
            nodes,
            vec![InlineNode::Text {
                literal: "*unclosed".to_string(),
                span: Span::new(0, 9),
            }]
        );
    }

    #[test]
    fn code_span_suppresses_emphasis() {
        let nodes = parse_one("`*not em*`");
        assert_eq!(
            nodes,
            vec![InlineNode::Code {
                literal: "*not em*".to_string(),
                span: Span::new(0, 10),
            }]
        );
    }

    #[test]
    fn strikethrough_pairs_double_tildes() {
        let nodes = parse_one("~~gone~~");
        assert!(matches!(
            &nodes[0],
            InlineNode::Strikethrough { span, .. } if *span == Span::new(0, 8)
        ));
    }

    #[test]
    fn single_tilde_is_text() {
        let nodes = parse_one("a ~ b");
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn inline_link() {
        let nodes = parse_one("Hello [world](https://example.com).");
        let InlineNode::Link {
            children,
            url,
            span,
        } = &nodes[1]
        else {
            panic!("expected link, got {nodes:?}");
        };
        assert_eq!(url, "https://example.com");
        assert_eq!(*span, Span::new(6, 28));
        assert_eq!(
            children[0],
            InlineNode::Text {
                literal: "world".to_string(),
                span: Span::new(7, 5),
            }
        );
    }

    #[test]
    fn image_includes_bang_in_span() {
        let nodes = parse_one("![alt](/img.png)");
        let InlineNode::Image { url, span, .. } = &nodes[0] else {
            panic!("expected image");
        };
        assert_eq!(url, "/img.png");
        assert_eq!(*span, Span::new(0, 16));
    }

    #[test]
    fn bracket_without_suffix_is_text() {
        let nodes = parse_one("[not a link]");
        assert_eq!(
            nodes,
            vec![InlineNode::Text {
                literal: "[not a link]".to_string(),
                span: Span::new(0, 12),
            }]
        );
    }

    #[test]
    fn autolink() {
        let nodes = parse_one("<https://example.com>");
        let InlineNode::Link { url, span, .. } = &nodes[0] else {
            panic!("expected autolink");
        };
        assert_eq!(url, "https://example.com");
        assert_eq!(*span, Span::new(0, 21));
    }

    #[test]
    fn raw_html_tag() {
        let nodes = parse_one("Returns <code>nil</code>.");
        assert_eq!(nodes.len(), 5);
        assert!(matches!(&nodes[1], InlineNode::Html { literal, .. } if literal == "<code>"));
        assert!(matches!(&nodes[3], InlineNode::Html { literal, .. } if literal == "</code>"));
    }

    #[test]
    fn escape_collapses_into_text() {
        let nodes = parse_one(r"a\*b");
        assert_eq!(
            nodes,
            vec![InlineNode::Text {
                literal: "a*b".to_string(),
                span: Span::new(0, 4),
            }]
        );
    }

    #[test]
    fn soft_break_between_lines() {
        let nodes = parse_parts(&[
            Part {
                span: Span::new(0, 5),
                text: "Hello",
            },
            Part {
                span: Span::new(10, 5),
                text: "World",
            },
        ]);
        assert_eq!(
            nodes,
            vec![
                InlineNode::Text {
                    literal: "Hello".to_string(),
                    span: Span::new(0, 5),
                },
                InlineNode::SoftBreak {
                    span: Span::new(5, 5),
                },
                InlineNode::Text {
                    literal: "World".to_string(),
                    span: Span::new(10, 5),
                },
            ]
        );
    }

    #[test]
    fn hard_break_from_trailing_spaces() {
        let nodes = parse_parts(&[
            Part {
                span: Span::new(0, 7),
                text: "Hello  ",
            },
            Part {
                span: Span::new(8, 5),
                text: "World",
            },
        ]);
        assert_eq!(nodes.len(), 3);
        assert_eq!(
            nodes[1],
            InlineNode::LineBreak {
                span: Span::new(5, 3),
            }
        );
    }

    #[test]
    fn emphasis_spans_soft_break() {
        let nodes = parse_parts(&[
            Part {
                span: Span::new(0, 4),
                text: "*one",
            },
            Part {
                span: Span::new(5, 4),
                text: "two*",
            },
        ]);
        let InlineNode::Emphasis { children, span } = &nodes[0] else {
            panic!("expected emphasis spanning lines, got {nodes:?}");
        };
        assert_eq!(*span, Span::new(0, 9));
        assert_eq!(children.len(), 3);
        assert!(matches!(children[1], InlineNode::SoftBreak { .. }));
    }

    #[test]
    fn multibyte_text_spans_stay_byte_accurate() {
        let nodes = parse_one("héllo *wörld*");
        // h(1) é(2) l l o (1) space = 7 bytes before the run
        let InlineNode::Emphasis { span, .. } = &nodes[1] else {
            panic!("expected emphasis");
        };
        assert_eq!(*span, Span::new(7, 8));
    }
}
