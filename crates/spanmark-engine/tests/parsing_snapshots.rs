use spanmark_engine::parsing::snapshot;
use spanmark_engine::{Document, MAX_NESTING_DEPTH, ParseError};

fn fixture(name: &str) -> Document {
    let md = std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.md",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();
    let doc = Document::parse(&md).unwrap();
    snapshot::invariants(&doc);
    doc
}

#[test]
fn fixture_simple_paragraph() {
    let doc = fixture("simple_paragraph");
    insta::assert_snapshot!(doc.canonicalize(), @"Hello *world* from a simple paragraph.");
}

#[test]
fn fixture_headings_and_breaks() {
    let doc = fixture("headings_and_breaks");
    insta::assert_snapshot!(doc.canonicalize(), @r"
# Title

Some text
over two lines.

***

## Sub *title*
");
}

#[test]
fn fixture_nested_quote_list() {
    let doc = fixture("nested_quote_list");
    insta::assert_snapshot!(doc.canonicalize(), @r"
> quoted paragraph
> continues here

1. one
2. two

   - nested 1
   - nested 2
");
}

#[test]
fn fixture_code_and_html() {
    let doc = fixture("code_and_html");
    insta::assert_snapshot!(doc.canonicalize(), @r#"
Intro with `code span`.

```rust
fn main() {}
```

<div class="x">
raw block
</div>
"#);
}

#[test]
fn fixture_links_and_images() {
    let doc = fixture("links_and_images");
    insta::assert_snapshot!(doc.canonicalize(), @r"
See [the guide](https://example.com/guide) and ![logo](/logo.png).

Autolink: <https://example.com> done.
");
}

#[test]
fn normalized_view_labels_nodes() {
    let doc = fixture("headings_and_breaks");
    let snap = snapshot::normalize(&doc);
    let kinds: Vec<&str> = snap.blocks.iter().map(|b| b.kind.as_str()).collect();
    assert_eq!(
        kinds,
        ["Heading(1)", "Paragraph", "ThematicBreak", "Heading(2)"]
    );
    assert_eq!(snap.blocks[0].span, (0, 8));
}

#[test]
fn invariants_hold_for_multibyte_sources() {
    let doc = Document::parse("# Tïtle\n\n> çitation *emphasïs*\n\n- lïst ïtem\n").unwrap();
    snapshot::invariants(&doc);
}

#[test]
fn quote_nesting_beyond_limit_fails() {
    let src = format!("{}deep", ">".repeat(MAX_NESTING_DEPTH * 3));
    let err = Document::parse(&src).unwrap_err();
    assert!(matches!(err, ParseError::TooDeeplyNested { .. }));
}

#[test]
fn emphasis_nesting_beyond_limit_fails() {
    // Deeply nested emphasis is built iteratively, so the guard is a check
    // on the finished tree rather than a recursion bound.
    let src = format!("{}x{}", "*a ".repeat(200), " b*".repeat(200));
    let err = Document::parse(&src).unwrap_err();
    assert!(matches!(err, ParseError::TooDeeplyNested { .. }));
}

#[test]
fn nesting_at_the_limit_still_parses() {
    let src = format!("{}ok", ">".repeat(MAX_NESTING_DEPTH - 1));
    let doc = Document::parse(&src).unwrap();
    snapshot::invariants(&doc);
}
