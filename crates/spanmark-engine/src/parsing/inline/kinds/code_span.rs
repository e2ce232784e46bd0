/// Code span syntax knowledge.
///
/// Code spans are a raw zone: nothing inside them is parsed, so the scanner
/// tries them before any other construct.
pub(crate) struct CodeSpan;

impl CodeSpan {
    pub const TICK: u8 = b'`';

    /// Scans a code span whose opening backtick run starts at `at`.
    ///
    /// The closing run must have exactly the opening run's length. Returns
    /// the normalized literal and the local end offset (past the closing
    /// run), or `None` when unclosed - the caller falls back to literal
    /// backticks.
    pub fn scan(text: &str, at: usize) -> Option<(String, usize)> {
        let bytes = text.as_bytes();
        let open_len = bytes[at..].iter().take_while(|&&b| b == Self::TICK).count();
        let mut i = at + open_len;
        while i < bytes.len() {
            if bytes[i] == Self::TICK {
                let run = bytes[i..].iter().take_while(|&&b| b == Self::TICK).count();
                if run == open_len {
                    let literal = Self::normalize(&text[at + open_len..i]);
                    return Some((literal, i + run));
                }
                i += run;
            } else {
                i += 1;
            }
        }
        None
    }

    /// Line endings become spaces; one space is stripped from both ends when
    /// the content has them and is not all spaces.
    fn normalize(inner: &str) -> String {
        let s = inner.replace('\n', " ");
        let stripped = s.strip_prefix(' ').and_then(|t| t.strip_suffix(' '));
        match stripped {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_span() {
        assert_eq!(CodeSpan::scan("`nil`.", 0), Some(("nil".to_string(), 5)));
    }

    #[test]
    fn closing_run_must_match_length() {
        // ``a`` closes with a double run; the single backtick inside is content.
        assert_eq!(CodeSpan::scan("``a`b``", 0), Some(("a`b".to_string(), 7)));
    }

    #[test]
    fn unclosed_returns_none() {
        assert_eq!(CodeSpan::scan("`unclosed", 0), None);
        assert_eq!(CodeSpan::scan("``one`", 0), None);
    }

    #[test]
    fn one_space_padding_stripped() {
        assert_eq!(CodeSpan::scan("` `` `", 0), Some(("``".to_string(), 6)));
    }

    #[test]
    fn all_space_content_kept() {
        assert_eq!(CodeSpan::scan("`  `", 0), Some(("  ".to_string(), 4)));
    }

    #[test]
    fn newline_becomes_space() {
        assert_eq!(CodeSpan::scan("`a\nb`", 0), Some(("a b".to_string(), 5)));
    }
}
