//! Single-pass classifier for C-family source text.
//!
//! The scanner walks the input left to right with a few bytes of lookahead
//! and yields [`Segment`]s lazily. All delimiters it reacts to are ASCII, so
//! working on the UTF-8 bytes keeps every boundary on a char boundary.
//!
//! Literals take precedence over comments: once a quote opens a literal,
//! comment markers are plain text until the literal closes, and quotes inside
//! comments never open literals. Block comments do not nest. Which quotes
//! and comment markers exist is decided by the [`Syntax`] of the language.

pub mod state;
pub mod warning;

use crate::models::language::{Backtick, Syntax};
use crate::models::segment::Segment;
use memchr::{memchr, memchr2, memchr3, memmem};
use std::iter::FusedIterator;

pub use state::ScanState;
pub use warning::ScanWarning;

/// Scan `source` with the plain C-family syntax into a lazy sequence of segments.
///
/// Scanning is a pure function of the input; calling this again on the same
/// text yields the same sequence.
pub fn scan(source: &str) -> Scanner<'_> {
    Scanner::new(source)
}

/// Scan `source` with the rules of a specific language
pub fn scan_with(source: &str, syntax: Syntax) -> Scanner<'_> {
    Scanner::with_syntax(source, syntax)
}

/// Scan the whole input eagerly
pub fn scan_all(source: &str) -> ScanResult<'_> {
    Scanner::new(source).finish()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult<'a> {
    pub segments: Vec<Segment<'a>>,
    pub warnings: Vec<ScanWarning>,
}

/// Where a template literal scan currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TemplateFrame {
    Text,
    /// Inside `${ ... }` with this many unclosed `{`
    Substitution(usize),
}

#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    syntax: Syntax,
    pos: usize,
    line: usize,
    warnings: Vec<ScanWarning>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_syntax(source, Syntax::C_FAMILY)
    }

    pub fn with_syntax(source: &'a str, syntax: Syntax) -> Self {
        Self {
            source,
            syntax,
            pos: 0,
            line: 1,
            warnings: Vec::new(),
        }
    }

    /// Warnings for the segments yielded so far
    pub fn warnings(&self) -> &[ScanWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<ScanWarning> {
        self.warnings
    }

    /// Consume the rest of the input
    pub fn finish(mut self) -> ScanResult<'a> {
        let segments = self.by_ref().collect();
        ScanResult {
            segments,
            warnings: self.warnings,
        }
    }

    fn bytes(&self) -> &'a [u8] {
        self.source.as_bytes()
    }

    /// Next byte at or after `from` that may open a comment or literal
    fn next_candidate(&self, from: usize) -> Option<usize> {
        let rest = &self.bytes()[from..];
        let common = memchr3(b'/', b'"', b'\'', rest);
        let extra = match (self.syntax.backtick != Backtick::Code, self.syntax.hash_comments) {
            (true, true) => memchr2(b'`', b'#', rest),
            (true, false) => memchr(b'`', rest),
            (false, true) => memchr(b'#', rest),
            (false, false) => None,
        };

        let offset = match (common, extra) {
            (Some(a), Some(b)) => a.min(b),
            (a, b) => a.or(b)?,
        };
        Some(from + offset)
    }

    fn code_end(&self, start: usize) -> usize {
        let bytes = self.bytes();
        let mut from = start;

        while let Some(at) = self.next_candidate(from) {
            if ScanState::opening(bytes, at, &self.syntax) != ScanState::InCode {
                return at;
            }
            from = at + 1;
        }

        bytes.len()
    }

    fn line_comment_end(&self, start: usize, state: ScanState) -> usize {
        let bytes = self.bytes();
        let body = start + state.opener_len();

        match memchr(b'\n', &bytes[body..]) {
            Some(offset) => {
                let newline = body + offset;
                // leave a CRLF terminator intact
                if newline > body && bytes[newline - 1] == b'\r' {
                    newline - 1
                } else {
                    newline
                }
            }
            None => bytes.len(),
        }
    }

    fn block_comment_end(&mut self, start: usize, state: ScanState) -> usize {
        let bytes = self.bytes();
        let body = start + state.opener_len();

        match memmem::find(&bytes[body..], b"*/") {
            Some(offset) => body + offset + 2,
            None => {
                self.warnings
                    .push(ScanWarning::UnterminatedBlockComment { line: self.line });
                bytes.len()
            }
        }
    }

    fn literal_end(&mut self, start: usize, mut state: ScanState) -> usize {
        let bytes = self.bytes();
        let mut pos = start + state.opener_len();

        while pos < bytes.len() {
            let byte = bytes[pos];
            if byte == b'\n' {
                self.warn_unterminated_literal(state);
                return if pos - 1 > start && bytes[pos - 1] == b'\r' {
                    pos - 1
                } else {
                    pos
                };
            }

            match state.advance_literal(byte) {
                Some(next) => state = next,
                None => return pos + 1,
            }
            pos += 1;
        }

        self.warn_unterminated_literal(state);
        bytes.len()
    }

    fn text_block_end(&mut self, start: usize, quote: u8) -> usize {
        let bytes = self.bytes();
        let closer = [quote; 3];
        let mut pos = start + 3;

        while pos < bytes.len() {
            if bytes[pos] == b'\\' {
                pos += 2;
            } else if bytes[pos..].starts_with(&closer) {
                // extra quotes before the closer belong to the content
                let mut end = pos + 3;
                while bytes.get(end) == Some(&quote) {
                    end += 1;
                }
                return end;
            } else {
                pos += 1;
            }
        }

        self.warnings
            .push(ScanWarning::UnterminatedTextBlock { line: self.line });
        bytes.len()
    }

    fn raw_string_end(&mut self, start: usize) -> usize {
        let bytes = self.bytes();
        match memchr(b'`', &bytes[start + 1..]) {
            Some(offset) => start + 1 + offset + 1,
            None => self.warn_unterminated_template(),
        }
    }

    /// End of a template literal, following `${ ... }` substitutions so that
    /// backticks and braces inside them do not close the outer literal
    fn template_end(&mut self, start: usize) -> usize {
        let bytes = self.bytes();
        let mut frames = vec![TemplateFrame::Text];
        let mut pos = start + 1;

        while let Some(&frame) = frames.last() {
            let Some(&byte) = bytes.get(pos) else {
                return self.warn_unterminated_template();
            };

            match (frame, byte) {
                (TemplateFrame::Text, b'\\') => pos += 1,
                (TemplateFrame::Text, b'`') => {
                    frames.pop();
                }
                (TemplateFrame::Text, b'$') if bytes.get(pos + 1) == Some(&b'{') => {
                    frames.push(TemplateFrame::Substitution(0));
                    pos += 1;
                }
                (TemplateFrame::Substitution(_), b'`') => frames.push(TemplateFrame::Text),
                (TemplateFrame::Substitution(depth), b'{') => {
                    frames.pop();
                    frames.push(TemplateFrame::Substitution(depth + 1));
                }
                (TemplateFrame::Substitution(0), b'}') => {
                    frames.pop();
                }
                (TemplateFrame::Substitution(depth), b'}') => {
                    frames.pop();
                    frames.push(TemplateFrame::Substitution(depth - 1));
                }
                (TemplateFrame::Substitution(_), b'"' | b'\'') => {
                    pos = skip_quoted(bytes, pos);
                    continue;
                }
                _ => {}
            }
            pos += 1;
        }

        pos
    }

    fn warn_unterminated_template(&mut self) -> usize {
        self.warnings
            .push(ScanWarning::UnterminatedTemplateLiteral { line: self.line });
        self.bytes().len()
    }

    fn warn_unterminated_literal(&mut self, state: ScanState) {
        let line = self.line;
        let warning = match state {
            ScanState::InChar { .. } => ScanWarning::UnterminatedCharLiteral { line },
            _ => ScanWarning::UnterminatedStringLiteral { line },
        };
        self.warnings.push(warning);
    }
}

/// Offset just past the quoted string opening at `pos`, stopping at a line end
fn skip_quoted(bytes: &[u8], pos: usize) -> usize {
    let quote = bytes[pos];
    let mut i = pos + 1;
    while let Some(&byte) = bytes.get(i) {
        match byte {
            b'\\' => i += 2,
            b'\n' => return i,
            _ if byte == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.bytes();
        if self.pos >= bytes.len() {
            return None;
        }

        let start = self.pos;
        let state = ScanState::opening(bytes, start, &self.syntax);
        let end = match state {
            ScanState::InCode => self.code_end(start),
            ScanState::InLineComment | ScanState::InHashComment => {
                self.line_comment_end(start, state)
            }
            ScanState::InBlockComment { .. } => self.block_comment_end(start, state),
            ScanState::InString { .. } | ScanState::InChar { .. } => {
                self.literal_end(start, state)
            }
            ScanState::InTextBlock { quote } => self.text_block_end(start, quote),
            ScanState::InTemplate { raw: true } => self.raw_string_end(start),
            ScanState::InTemplate { raw: false } => self.template_end(start),
        }
        .min(bytes.len());

        let segment = Segment::new(
            state.segment_kind(),
            start,
            end,
            self.line,
            &self.source[start..end],
        );
        self.line += segment.newline_count();
        self.pos = end;

        Some(segment)
    }
}

impl FusedIterator for Scanner<'_> {}
