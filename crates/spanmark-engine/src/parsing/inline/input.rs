use crate::span::Span;

/// One line's worth of inline content: the text slice and its absolute span.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Part<'a> {
    pub span: Span,
    pub text: &'a str,
}

/// Inline content of a leaf block, joined for scanning.
///
/// Multi-line content (a paragraph, possibly quote-stripped) is joined with
/// `\n` into one string so constructs can span line endings. Local offsets
/// into the joined text map back to document coordinates through a piecewise
/// table; the `\n` separators map to the gap between the surrounding parts,
/// which is exactly the region a soft or hard break collapses.
pub(crate) struct InlineInput {
    text: String,
    /// `(local_start, absolute_span)` per part, in order.
    parts: Vec<(usize, Span)>,
}

impl InlineInput {
    pub fn new(parts: &[Part<'_>]) -> Self {
        let mut text = String::new();
        let mut table = Vec::with_capacity(parts.len());
        for (idx, p) in parts.iter().enumerate() {
            if idx > 0 {
                text.push('\n');
            }
            table.push((text.len(), p.span));
            text.push_str(p.text);
        }
        Self { text, parts: table }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Maps a local offset to an absolute byte offset.
    ///
    /// Offsets on a separator resolve to the end of the preceding part, and
    /// the first offset of a part to the part's absolute start, so a span
    /// crossing a separator covers the whole inter-line gap.
    pub fn abs(&self, local: usize) -> usize {
        let idx = self
            .parts
            .partition_point(|&(start, _)| start <= local)
            .saturating_sub(1);
        let (start, span) = self.parts[idx];
        span.start + (local - start).min(span.len)
    }

    /// Maps a local half-open range to an absolute span.
    pub fn abs_span(&self, lo: usize, hi: usize) -> Span {
        Span::from_bounds(self.abs(lo), self.abs(hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(parts: &[(usize, &'static str)]) -> InlineInput {
        let parts: Vec<Part<'_>> = parts
            .iter()
            .map(|&(start, text)| Part {
                span: Span::new(start, text.len()),
                text,
            })
            .collect();
        InlineInput::new(&parts)
    }

    #[test]
    fn single_part_is_identity() {
        let inp = input(&[(10, "hello")]);
        assert_eq!(inp.text(), "hello");
        assert_eq!(inp.abs(0), 10);
        assert_eq!(inp.abs(5), 15);
        assert_eq!(inp.abs_span(1, 4), Span::new(11, 3));
    }

    #[test]
    fn separator_maps_to_gap() {
        // Source: "> ab\n> cd" - parts at 2 and 7.
        let inp = input(&[(2, "ab"), (7, "cd")]);
        assert_eq!(inp.text(), "ab\ncd");
        // The separator position is the end of the first part...
        assert_eq!(inp.abs(2), 4);
        // ...and the next part starts past the stripped prefix.
        assert_eq!(inp.abs(3), 7);
        assert_eq!(inp.abs_span(2, 3), Span::new(4, 3));
    }

    #[test]
    fn span_across_parts_covers_gap() {
        let inp = input(&[(0, "ab"), (5, "cd")]);
        assert_eq!(inp.abs_span(0, 5), Span::new(0, 7));
    }
}
