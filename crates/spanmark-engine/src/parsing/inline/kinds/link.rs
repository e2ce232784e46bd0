use crate::parsing::inline::cursor::Cursor;

/// Inline link destination syntax knowledge: the `(url "title")` suffix.
pub(crate) struct LinkSuffix;

impl LinkSuffix {
    /// Parses the destination suffix that must follow a link's `]`.
    ///
    /// `rest` starts just past the `]`. Returns the destination (backslash
    /// escapes resolved) and the consumed byte length including both
    /// parentheses, or `None` when the suffix is malformed - the caller then
    /// falls back to literal text. An optional quoted title is accepted and
    /// discarded; titles are not part of the document model.
    pub fn scan(rest: &str) -> Option<(String, usize)> {
        let mut cur = Cursor::new(rest);
        if cur.bump() != Some(b'(') {
            return None;
        }
        skip_ws(&mut cur);

        let url = match cur.peek() {
            Some(b'<') => pointy_destination(&mut cur)?,
            Some(b')') => String::new(),
            _ => bare_destination(&mut cur)?,
        };

        skip_ws(&mut cur);
        title(&mut cur);
        skip_ws(&mut cur);

        if cur.bump() != Some(b')') {
            return None;
        }
        Some((url, cur.pos()))
    }
}

fn skip_ws(cur: &mut Cursor<'_>) {
    while matches!(cur.peek(), Some(b' ' | b'\t' | b'\n')) {
        cur.bump();
    }
}

/// `<...>` destination: no newlines or unescaped angle brackets inside.
fn pointy_destination(cur: &mut Cursor<'_>) -> Option<String> {
    cur.bump(); // <
    let mut url = String::new();
    loop {
        match cur.bump()? {
            b'>' => return Some(url),
            b'<' | b'\n' => return None,
            b'\\' => match cur.bump() {
                Some(b) if b.is_ascii_punctuation() => url.push(b as char),
                Some(b) => {
                    url.push('\\');
                    push_byte(&mut url, b);
                }
                None => return None,
            },
            b => push_byte(&mut url, b),
        }
    }
}

/// Bare destination: runs to whitespace or the closing paren, with balanced
/// inner parentheses.
fn bare_destination(cur: &mut Cursor<'_>) -> Option<String> {
    let mut url = String::new();
    let mut depth = 0usize;
    while let Some(b) = cur.peek() {
        match b {
            b' ' | b'\t' | b'\n' => break,
            b'(' => {
                depth += 1;
                url.push('(');
                cur.bump();
            }
            b')' => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                url.push(')');
                cur.bump();
            }
            b'\\' => {
                cur.bump();
                match cur.bump() {
                    Some(p) if p.is_ascii_punctuation() => url.push(p as char),
                    Some(p) => {
                        url.push('\\');
                        push_byte(&mut url, p);
                    }
                    None => return None,
                }
            }
            _ if b < 0x20 => break,
            _ => {
                push_byte(&mut url, b);
                cur.bump();
            }
        }
    }
    if depth != 0 || url.is_empty() {
        return None;
    }
    Some(url)
}

/// Optional title in `"..."`, `'...'`, or `(...)`. Content is discarded.
fn title(cur: &mut Cursor<'_>) -> bool {
    let close = match cur.peek() {
        Some(b'"') => b'"',
        Some(b'\'') => b'\'',
        Some(b'(') => b')',
        _ => return false,
    };
    let saved = cur.clone();
    cur.bump();
    while let Some(b) = cur.bump() {
        if b == close {
            return true;
        }
        if b == b'\\' {
            cur.bump();
        }
    }
    *cur = saved;
    false
}

/// Bytes above ASCII are UTF-8 continuation or lead bytes; pushing them one
/// at a time through `char` would mangle them, so collect via raw bytes.
fn push_byte(url: &mut String, b: u8) {
    if b.is_ascii() {
        url.push(b as char);
    } else {
        // Safe for UTF-8 input: non-ASCII bytes arrive in valid sequences
        // and are appended in order.
        unsafe { url.as_mut_vec().push(b) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_destination_suffix() {
        let (url, len) = LinkSuffix::scan("(https://example.com).").unwrap();
        assert_eq!(url, "https://example.com");
        assert_eq!(len, 21);
    }

    #[test]
    fn pointy_destination_allows_spaces() {
        let (url, _) = LinkSuffix::scan("(<my doc.md>)").unwrap();
        assert_eq!(url, "my doc.md");
    }

    #[test]
    fn title_is_accepted_and_discarded() {
        let (url, len) = LinkSuffix::scan("(/a \"title\")x").unwrap();
        assert_eq!(url, "/a");
        assert_eq!(len, 12);
    }

    #[test]
    fn balanced_parens_in_destination() {
        let (url, _) = LinkSuffix::scan("(/a(b)c)").unwrap();
        assert_eq!(url, "/a(b)c");
    }

    #[test]
    fn empty_destination() {
        let (url, len) = LinkSuffix::scan("()").unwrap();
        assert_eq!(url, "");
        assert_eq!(len, 2);
    }

    #[test]
    fn malformed_suffixes() {
        assert!(LinkSuffix::scan("not a paren").is_none());
        assert!(LinkSuffix::scan("(unclosed").is_none());
        assert!(LinkSuffix::scan("(a b)").is_none());
        assert!(LinkSuffix::scan("(<a\nb>)").is_none());
    }

    #[test]
    fn escapes_resolved() {
        let (url, _) = LinkSuffix::scan(r"(/a\)b)").unwrap();
        assert_eq!(url, "/a)b");
    }

    #[test]
    fn multibyte_destination() {
        let (url, _) = LinkSuffix::scan("(/café)").unwrap();
        assert_eq!(url, "/café");
    }
}
