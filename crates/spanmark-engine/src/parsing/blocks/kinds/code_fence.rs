/// Fence delimiter character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    pub fn byte(self) -> u8 {
        match self {
            FenceKind::Backticks => b'`',
            FenceKind::Tildes => b'~',
        }
    }
}

/// An opening fence: delimiter kind, run length, and leading indent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FenceSig {
    pub kind: FenceKind,
    pub len: usize,
    /// Leading spaces before the fence; stripped from content lines.
    pub indent: usize,
}

/// Fenced code block syntax knowledge.
pub(crate) struct CodeFence;

impl CodeFence {
    pub const MIN_LEN: usize = 3;

    /// Detects an opening fence, returning its signature and the info string.
    ///
    /// Backtick fences reject info strings containing backticks, so that
    /// `` ``` `` inside a line of code spans does not open a block.
    pub fn open(s: &str) -> Option<(FenceSig, &str)> {
        let indent = leading_spaces(s);
        if indent > 3 {
            return None;
        }
        let rest = &s[indent..];
        let kind = match rest.as_bytes().first() {
            Some(b'`') => FenceKind::Backticks,
            Some(b'~') => FenceKind::Tildes,
            _ => return None,
        };
        let len = run_len(rest, kind.byte());
        if len < Self::MIN_LEN {
            return None;
        }
        let info = rest[len..].trim();
        if kind == FenceKind::Backticks && info.contains('`') {
            return None;
        }
        Some((FenceSig { kind, len, indent }, info))
    }

    /// Returns true if `s` closes a fence opened with `open`: the same
    /// delimiter, at least as long, and nothing but whitespace after it.
    pub fn closes(open: FenceSig, s: &str) -> bool {
        let indent = leading_spaces(s);
        if indent > 3 {
            return false;
        }
        let rest = &s[indent..];
        let len = run_len(rest, open.kind.byte());
        len >= open.len && rest[len..].trim().is_empty()
    }
}

fn leading_spaces(s: &str) -> usize {
    s.bytes().take_while(|&b| b == b' ').count()
}

fn run_len(s: &str, byte: u8) -> usize {
    s.bytes().take_while(|&b| b == byte).count()
}
