use serde::Serialize;
use std::fmt;

/// Classification of a contiguous span of source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Anything that is not a comment or a literal
    Code,
    /// `// ...` up to, but not including, the line terminator
    LineComment,
    /// `/* ... */`
    BlockComment,
    /// `/** ... */`
    DocComment,
    /// `"..."`
    StringLiteral,
    /// `'...'`
    CharLiteral,
}

impl SegmentKind {
    #[must_use]
    pub const fn is_comment(self) -> bool {
        matches!(
            self,
            SegmentKind::LineComment | SegmentKind::BlockComment | SegmentKind::DocComment
        )
    }

    #[must_use]
    pub const fn is_literal(self) -> bool {
        matches!(self, SegmentKind::StringLiteral | SegmentKind::CharLiteral)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SegmentKind::Code => "code",
            SegmentKind::LineComment => "line_comment",
            SegmentKind::BlockComment => "block_comment",
            SegmentKind::DocComment => "doc_comment",
            SegmentKind::StringLiteral => "string_literal",
            SegmentKind::CharLiteral => "char_literal",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified span of the scanned input.
///
/// `text` always equals `&source[start..end]`, and `start_line` is the
/// 1-based line on which the span begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub start: usize,
    pub end: usize,
    pub start_line: usize,
    pub text: &'a str,
}

impl<'a> Segment<'a> {
    #[must_use]
    pub const fn new(kind: SegmentKind, start: usize, end: usize, start_line: usize, text: &'a str) -> Self {
        Self {
            kind,
            start,
            end,
            start_line,
            text,
        }
    }

    #[must_use]
    pub const fn is_comment(&self) -> bool {
        self.kind.is_comment()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of `\n` bytes inside the span
    #[must_use]
    pub fn newline_count(&self) -> usize {
        memchr::memchr_iter(b'\n', self.text.as_bytes()).count()
    }

    /// Line on which the span ends
    #[must_use]
    pub fn end_line(&self) -> usize {
        self.start_line + self.newline_count()
    }
}
