use crate::models::options::{Mode, ProcessOptions};
use crate::models::segment::{Segment, SegmentKind};
use crate::rules::preservation::RuleSet;
use anyhow::Result;
use serde::Serialize;

/// One comment reported in extract mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentRecord {
    pub kind: SegmentKind,
    pub start_line: usize,
    pub text: String,
}

impl From<&Segment<'_>> for CommentRecord {
    fn from(segment: &Segment<'_>) -> Self {
        Self {
            kind: segment.kind,
            start_line: segment.start_line,
            text: segment.text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stripped(String),
    Extracted(Vec<CommentRecord>),
}

impl Output {
    pub fn as_stripped(&self) -> Option<&str> {
        match self {
            Output::Stripped(text) => Some(text),
            Output::Extracted(_) => None,
        }
    }

    pub fn as_extracted(&self) -> Option<&[CommentRecord]> {
        match self {
            Output::Extracted(records) => Some(records),
            Output::Stripped(_) => None,
        }
    }
}

/// Turns a segment stream into stripped source or comment records
pub struct OutputGenerator<'r> {
    options: &'r ProcessOptions,
    rules: &'r RuleSet,
}

impl<'r> OutputGenerator<'r> {
    pub fn new(options: &'r ProcessOptions, rules: &'r RuleSet) -> Self {
        Self { options, rules }
    }

    pub fn generate<'a, I>(&self, segments: I) -> (Output, OutputStatistics)
    where
        I: IntoIterator<Item = Segment<'a>>,
    {
        match self.options.mode {
            Mode::Strip => {
                let (text, stats) = self.strip(segments);
                (Output::Stripped(text), stats)
            }
            Mode::Extract => {
                let (records, stats) = self.extract(segments);
                (Output::Extracted(records), stats)
            }
        }
    }

    pub fn strip<'a, I>(&self, segments: I) -> (String, OutputStatistics)
    where
        I: IntoIterator<Item = Segment<'a>>,
    {
        let mut output = String::new();
        let mut stats = OutputStatistics::default();

        for segment in segments {
            stats.original_bytes += segment.len();

            if !segment.is_comment() {
                output.push_str(segment.text);
                continue;
            }

            stats.comments_found += 1;
            if self.rules.should_preserve(&segment) {
                stats.comments_preserved += 1;
                output.push_str(segment.text);
                continue;
            }

            stats.comments_removed += 1;
            if self.options.preserve_line_numbers {
                push_line_breaks(&mut output, segment.text);
            }
        }

        stats.processed_bytes = output.len();
        (output, stats)
    }

    pub fn extract<'a, I>(&self, segments: I) -> (Vec<CommentRecord>, OutputStatistics)
    where
        I: IntoIterator<Item = Segment<'a>>,
    {
        let mut records = Vec::new();
        let mut stats = OutputStatistics::default();

        for segment in segments {
            stats.original_bytes += segment.len();

            if !segment.is_comment() {
                continue;
            }
            if segment.kind == SegmentKind::DocComment && !self.options.include_doc_comments {
                continue;
            }

            stats.comments_found += 1;
            records.push(CommentRecord::from(&segment));
        }

        stats.processed_bytes = stats.original_bytes;
        (records, stats)
    }
}

/// Process a segment stream with freshly compiled rules for `options`
pub fn process<'a, I>(segments: I, options: &ProcessOptions) -> Result<Output>
where
    I: IntoIterator<Item = Segment<'a>>,
{
    let rules = RuleSet::from_options(options)?;
    let (output, _) = OutputGenerator::new(options, &rules).generate(segments);
    Ok(output)
}

/// Emit one line terminator for every terminator inside `removed`, keeping CRLF as CRLF
fn push_line_breaks(output: &mut String, removed: &str) {
    let bytes = removed.as_bytes();
    for newline in memchr::memchr_iter(b'\n', bytes) {
        if newline > 0 && bytes[newline - 1] == b'\r' {
            output.push_str("\r\n");
        } else {
            output.push('\n');
        }
    }
}

/// Line-by-line comparison used for dry runs
pub fn generate_diff(original: &str, processed: &str) -> String {
    let original_lines: Vec<&str> = original.lines().collect();
    let processed_lines: Vec<&str> = processed.lines().collect();

    let mut diff = String::new();
    let max_lines = original_lines.len().max(processed_lines.len());

    for i in 0..max_lines {
        match (original_lines.get(i), processed_lines.get(i)) {
            (Some(orig_line), Some(proc_line)) => {
                if orig_line != proc_line {
                    diff.push_str(&format!("{:>5} - {}\n", i + 1, orig_line));
                    diff.push_str(&format!("{:>5} + {}\n", i + 1, proc_line));
                }
            }
            (Some(orig_line), None) => {
                diff.push_str(&format!("{:>5} - {}\n", i + 1, orig_line));
            }
            (None, Some(proc_line)) => {
                diff.push_str(&format!("{:>5} + {}\n", i + 1, proc_line));
            }
            (None, None) => break,
        }
    }

    diff
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputStatistics {
    pub comments_found: usize,
    pub comments_removed: usize,
    pub comments_preserved: usize,
    pub original_bytes: usize,
    pub processed_bytes: usize,
}

impl OutputStatistics {
    pub fn bytes_saved(&self) -> usize {
        self.original_bytes.saturating_sub(self.processed_bytes)
    }

    pub fn reduction_percentage(&self) -> f64 {
        if self.original_bytes == 0 {
            0.0
        } else {
            (self.bytes_saved() as f64 / self.original_bytes as f64) * 100.0
        }
    }
}
