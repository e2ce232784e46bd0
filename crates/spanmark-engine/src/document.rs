use std::fmt;

use crate::ast::BlockNode;
use crate::canonical;
use crate::parsing::{self, ParseError};

/// A parsed Markdown document: the original source text plus its block tree.
///
/// Constructed once through [`Document::parse`] or [`Document::from_bytes`]
/// and immutable afterwards, so it can be shared read-only across threads.
/// Every node in the tree carries the byte span of the source it came from.
///
/// Equality is canonical: two documents are equal when their canonical
/// Markdown renderings match, so `__Hello__` and `**Hello**` parse to equal
/// documents even though their sources differ.
#[derive(Debug, Clone)]
pub struct Document {
    source: String,
    blocks: Vec<BlockNode>,
}

impl Document {
    /// Parses a complete Markdown text.
    ///
    /// Malformed syntax falls back to literal text per CommonMark and never
    /// fails; the only failure is container nesting beyond
    /// [`parsing::MAX_NESTING_DEPTH`].
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let blocks = parsing::parse_document(text)?;
        Ok(Self {
            source: text.to_string(),
            blocks,
        })
    }

    /// Parses raw bytes, rejecting invalid UTF-8 with
    /// [`ParseError::InvalidEncoding`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        let text = std::str::from_utf8(bytes)?;
        Self::parse(text)
    }

    /// The exact text this document was parsed from. Node spans index into
    /// this string.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Top-level blocks in document order.
    pub fn blocks(&self) -> &[BlockNode] {
        &self.blocks
    }

    /// Renders the canonical Markdown form.
    ///
    /// Deterministic and idempotent: parsing the result and canonicalizing
    /// again reproduces it byte for byte.
    pub fn canonicalize(&self) -> String {
        canonical::render_blocks(&self.blocks)
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.canonicalize() == other.canonicalize()
    }
}

impl Eq for Document {}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonicalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_delimiter_choice() {
        let a = Document::parse("Lorem *ipsum*").unwrap();
        let b = Document::parse("Lorem _ipsum_").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_content_is_unequal() {
        let a = Document::parse("# Hello").unwrap();
        let b = Document::parse("Lorem *ipsum*").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn from_bytes_rejects_invalid_utf8() {
        let err = Document::from_bytes(&[0x66, 0xff, 0x66]).unwrap_err();
        assert!(matches!(err, ParseError::InvalidEncoding(_)));
    }

    #[test]
    fn source_is_kept_verbatim() {
        let doc = Document::parse("# Hello\n").unwrap();
        assert_eq!(doc.source(), "# Hello\n");
    }
}
