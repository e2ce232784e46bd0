/// Thematic break syntax knowledge.
pub(crate) struct ThematicBreak;

impl ThematicBreak {
    pub const CHARS: [u8; 3] = [b'*', b'-', b'_'];

    /// Detects a thematic break: up to three leading spaces, then three or
    /// more of the same character from `* - _`, optionally interspersed
    /// with spaces or tabs, and nothing else.
    pub fn matches(s: &str) -> bool {
        let b = s.as_bytes();
        let mut i = 0usize;
        while i < b.len() && i < 3 && b[i] == b' ' {
            i += 1;
        }
        let Some(&ch) = b.get(i) else {
            return false;
        };
        if !Self::CHARS.contains(&ch) {
            return false;
        }
        let mut count = 0usize;
        while i < b.len() {
            match b[i] {
                c if c == ch => count += 1,
                b' ' | b'\t' => {}
                _ => return false,
            }
            i += 1;
        }
        count >= 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("---")]
    #[case("***")]
    #[case("___")]
    #[case("- - -")]
    #[case("  **  * ** * ** * **")]
    fn breaks(#[case] line: &str) {
        assert!(ThematicBreak::matches(line));
    }

    #[rstest]
    #[case("--")]
    #[case("-*-")]
    #[case("--- x")]
    #[case("")]
    fn non_breaks(#[case] line: &str) {
        assert!(!ThematicBreak::matches(line));
    }
}
