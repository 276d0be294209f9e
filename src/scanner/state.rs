use crate::models::language::{Apostrophe, Backtick, Syntax};
use crate::models::segment::SegmentKind;

/// Scanner mode at a given offset. Exactly one is active at a time; the
/// escape flag only exists while inside a single-line literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    InCode,
    InLineComment,
    /// `#` comment, reported as a line comment
    InHashComment,
    InBlockComment { doc: bool },
    InString { escaped: bool },
    InChar { escaped: bool },
    /// Tripled `quote`, may span lines
    InTextBlock { quote: u8 },
    /// Backtick literal, may span lines
    InTemplate { raw: bool },
}

impl ScanState {
    /// The state entered by the construct that starts at `pos`, looked at
    /// from code. Returns `InCode` when nothing opens there.
    pub fn opening(bytes: &[u8], pos: usize, syntax: &Syntax) -> Self {
        let Some(&byte) = bytes.get(pos) else {
            return ScanState::InCode;
        };

        match byte {
            b'"' | b'\'' if syntax.triples(byte) && starts_triple(bytes, pos, byte) => {
                ScanState::InTextBlock { quote: byte }
            }
            b'"' => ScanState::InString { escaped: false },
            b'\'' if is_digit_separator(bytes, pos) => ScanState::InCode,
            b'\'' => match syntax.apostrophe {
                Apostrophe::CharOnly if !is_char_literal(bytes, pos) => ScanState::InCode,
                _ => ScanState::InChar { escaped: false },
            },
            b'`' => match syntax.backtick {
                Backtick::Code => ScanState::InCode,
                Backtick::Template => ScanState::InTemplate { raw: false },
                Backtick::Raw => ScanState::InTemplate { raw: true },
            },
            b'#' if syntax.hash_comments && bytes.get(pos + 1) != Some(&b'[') => {
                ScanState::InHashComment
            }
            b'/' => match bytes.get(pos + 1) {
                Some(b'/') if syntax.line_comments => ScanState::InLineComment,
                Some(b'*') => ScanState::InBlockComment {
                    // `/**/` is an empty plain comment, not a doc opener
                    doc: bytes.get(pos + 2) == Some(&b'*') && bytes.get(pos + 3) != Some(&b'/'),
                },
                _ => ScanState::InCode,
            },
            _ => ScanState::InCode,
        }
    }

    /// Length in bytes of the delimiter that opened this state
    pub const fn opener_len(self) -> usize {
        match self {
            ScanState::InCode => 0,
            ScanState::InString { .. }
            | ScanState::InChar { .. }
            | ScanState::InTemplate { .. }
            | ScanState::InHashComment => 1,
            ScanState::InLineComment | ScanState::InBlockComment { .. } => 2,
            ScanState::InTextBlock { .. } => 3,
        }
    }

    /// Feed one byte to a literal state. Returns `None` once the byte closes
    /// the literal, otherwise the state to continue with.
    pub fn advance_literal(self, byte: u8) -> Option<Self> {
        let (quote, escaped) = match self {
            ScanState::InString { escaped } => (b'"', escaped),
            ScanState::InChar { escaped } => (b'\'', escaped),
            other => return Some(other),
        };

        let next_escaped = !escaped && byte == b'\\';
        if !escaped && byte == quote {
            return None;
        }

        Some(match self {
            ScanState::InString { .. } => ScanState::InString {
                escaped: next_escaped,
            },
            _ => ScanState::InChar {
                escaped: next_escaped,
            },
        })
    }

    pub const fn segment_kind(self) -> SegmentKind {
        match self {
            ScanState::InCode => SegmentKind::Code,
            ScanState::InLineComment => SegmentKind::LineComment,
            ScanState::InBlockComment { doc: true } => SegmentKind::DocComment,
            ScanState::InBlockComment { doc: false } => SegmentKind::BlockComment,
            ScanState::InString { .. }
            | ScanState::InTextBlock { .. }
            | ScanState::InTemplate { .. } => SegmentKind::StringLiteral,
            ScanState::InChar { .. } => SegmentKind::CharLiteral,
            ScanState::InHashComment => SegmentKind::LineComment,
        }
    }
}

fn starts_triple(bytes: &[u8], pos: usize, quote: u8) -> bool {
    bytes.get(pos + 1) == Some(&quote) && bytes.get(pos + 2) == Some(&quote)
}

/// `'` between two characters of a number, as in `1'000` or `0xFF'FF`
fn is_digit_separator(bytes: &[u8], pos: usize) -> bool {
    if !bytes.get(pos + 1).is_some_and(u8::is_ascii_alphanumeric) {
        return false;
    }

    let token_start = bytes[..pos]
        .iter()
        .rposition(|&b| !(b.is_ascii_alphanumeric() || matches!(b, b'_' | b'\'' | b'.')))
        .map_or(0, |i| i + 1);
    token_start < pos && bytes[token_start].is_ascii_digit()
}

/// `'x'` or `'\…'`: one character or an escape, as opposed to a lifetime or symbol
fn is_char_literal(bytes: &[u8], pos: usize) -> bool {
    match bytes.get(pos + 1) {
        Some(b'\\') => true,
        Some(b'\'') | Some(b'\n') | None => false,
        Some(&lead) => {
            let width = match lead {
                0x00..=0x7f => 1,
                0xc0..=0xdf => 2,
                0xe0..=0xef => 3,
                _ => 4,
            };
            bytes.get(pos + 1 + width) == Some(&b'\'')
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const C: Syntax = Syntax::C_FAMILY;

    #[test]
    fn test_opening_states() {
        assert_eq!(ScanState::opening(b"// x", 0, &C), ScanState::InLineComment);
        assert_eq!(
            ScanState::opening(b"/* x */", 0, &C),
            ScanState::InBlockComment { doc: false }
        );
        assert_eq!(
            ScanState::opening(b"/** x */", 0, &C),
            ScanState::InBlockComment { doc: true }
        );
        assert_eq!(
            ScanState::opening(b"/**/", 0, &C),
            ScanState::InBlockComment { doc: false }
        );
        assert_eq!(
            ScanState::opening(b"\"s\"", 0, &C),
            ScanState::InString { escaped: false }
        );
        assert_eq!(
            ScanState::opening(b"'c'", 0, &C),
            ScanState::InChar { escaped: false }
        );
        assert_eq!(ScanState::opening(b"a / b", 2, &C), ScanState::InCode);
        assert_eq!(ScanState::opening(b"/", 0, &C), ScanState::InCode);
        assert_eq!(ScanState::opening(b"x", 5, &C), ScanState::InCode);
        assert_eq!(ScanState::opening(b"`t`", 0, &C), ScanState::InCode);
        assert_eq!(ScanState::opening(b"# x", 0, &C), ScanState::InCode);
        assert_eq!(
            ScanState::opening(b"\"\"\"", 0, &C),
            ScanState::InString { escaped: false }
        );
    }

    #[test]
    fn test_language_specific_openers() {
        let css = C.without_line_comments();
        assert_eq!(ScanState::opening(b"//x", 0, &css), ScanState::InCode);
        assert_eq!(
            ScanState::opening(b"/*x*/", 0, &css),
            ScanState::InBlockComment { doc: false }
        );

        let php = C.with_hash_comments();
        assert_eq!(ScanState::opening(b"# x", 0, &php), ScanState::InHashComment);
        assert_eq!(ScanState::opening(b"#[Attr]", 0, &php), ScanState::InCode);

        let js = C.with_backtick(Backtick::Template);
        assert_eq!(
            ScanState::opening(b"`t`", 0, &js),
            ScanState::InTemplate { raw: false }
        );
        let go = C.with_backtick(Backtick::Raw);
        assert_eq!(
            ScanState::opening(b"`t`", 0, &go),
            ScanState::InTemplate { raw: true }
        );

        let kotlin = C.with_triple_quotes(b"\"");
        assert_eq!(
            ScanState::opening(b"\"\"\"x\"\"\"", 0, &kotlin),
            ScanState::InTextBlock { quote: b'"' }
        );
        assert_eq!(
            ScanState::opening(b"''' x '''", 0, &kotlin),
            ScanState::InChar { escaped: false }
        );
        let dart = C.with_triple_quotes(b"\"'");
        assert_eq!(
            ScanState::opening(b"''' x '''", 0, &dart),
            ScanState::InTextBlock { quote: b'\'' }
        );
    }

    #[test]
    fn test_digit_separators_are_code() {
        assert_eq!(ScanState::opening(b"1'000", 1, &C), ScanState::InCode);
        assert_eq!(ScanState::opening(b"n = 0xFF'FF;", 8, &C), ScanState::InCode);
        assert_eq!(ScanState::opening(b"1'000'000", 5, &C), ScanState::InCode);
        // character prefixes are not numbers
        assert_eq!(
            ScanState::opening(b"u8'a'", 2, &C),
            ScanState::InChar { escaped: false }
        );
        assert_eq!(
            ScanState::opening(b"case 1: x = 'a'", 12, &C),
            ScanState::InChar { escaped: false }
        );
    }

    #[test]
    fn test_char_only_apostrophes() {
        let rust = C.with_apostrophe(Apostrophe::CharOnly);
        assert_eq!(ScanState::opening(b"&'static str", 1, &rust), ScanState::InCode);
        assert_eq!(ScanState::opening(b"'outer: loop", 0, &rust), ScanState::InCode);
        assert_eq!(
            ScanState::opening(b"'a'", 0, &rust),
            ScanState::InChar { escaped: false }
        );
        assert_eq!(
            ScanState::opening(br"'\n'", 0, &rust),
            ScanState::InChar { escaped: false }
        );
        assert_eq!(
            ScanState::opening("'é'".as_bytes(), 0, &rust),
            ScanState::InChar { escaped: false }
        );
        // plain C keeps treating it as the start of a char literal
        assert_eq!(
            ScanState::opening(b"&'static", 1, &C),
            ScanState::InChar { escaped: false }
        );
    }

    #[test]
    fn test_escape_suppresses_closing_quote() {
        let state = ScanState::InString { escaped: false };
        let state = state.advance_literal(b'\\').unwrap();
        assert_eq!(state, ScanState::InString { escaped: true });
        let state = state.advance_literal(b'"').unwrap();
        assert_eq!(state, ScanState::InString { escaped: false });
        assert!(state.advance_literal(b'"').is_none());
    }

    #[test]
    fn test_double_backslash_does_not_escape_quote() {
        let state = ScanState::InChar { escaped: false };
        let state = state.advance_literal(b'\\').unwrap();
        let state = state.advance_literal(b'\\').unwrap();
        assert_eq!(state, ScanState::InChar { escaped: false });
        assert!(state.advance_literal(b'\'').is_none());
    }

    #[test]
    fn test_other_quote_does_not_close() {
        let state = ScanState::InString { escaped: false };
        assert_eq!(state.advance_literal(b'\''), Some(state));
        let state = ScanState::InChar { escaped: false };
        assert_eq!(state.advance_literal(b'"'), Some(state));
    }
}
