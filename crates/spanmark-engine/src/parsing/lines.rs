use crate::span::Span;

/// One source line with its absolute byte span.
///
/// `raw` keeps the trailing newline (when present) so block spans cover it;
/// `text()` strips it for classification.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Line<'a> {
    /// Byte span of this line, newline included.
    pub span: Span,
    /// The line text, newline included.
    pub raw: &'a str,
}

impl<'a> Line<'a> {
    /// Line content without the trailing `\r\n` or `\n`.
    pub fn text(&self) -> &'a str {
        self.raw.trim_end_matches(['\r', '\n'])
    }

    /// Byte offset just past the content, before any line ending.
    pub fn content_end(&self) -> usize {
        self.span.start + self.text().len()
    }

    /// Drops `n` bytes from the front, keeping the span absolute.
    pub fn strip_prefix_bytes(&self, n: usize) -> Line<'a> {
        let n = n.min(self.raw.len());
        Line {
            span: Span::from_bounds(self.span.start + n, self.span.end()),
            raw: &self.raw[n..],
        }
    }
}

/// Splits `source` into lines with their byte spans, newlines preserved.
pub(crate) fn lines_with_spans(source: &str) -> Vec<Line<'_>> {
    let mut out = Vec::new();
    let mut start = 0usize;
    let bytes = source.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'\n' {
            out.push(Line {
                span: Span::from_bounds(start, i + 1),
                raw: &source[start..=i],
            });
            start = i + 1;
        }
    }
    if start < source.len() {
        out.push(Line {
            span: Span::from_bounds(start, source.len()),
            raw: &source[start..],
        });
    }
    out
}
